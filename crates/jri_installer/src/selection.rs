use crate::{
    json::list::{MajorVersionEntry, PlatformVariant},
    platform::{resolve_variants, HostPlatform},
    vendor::Vendor,
};

/// Cascading vendor → major version → platform variant selection.
///
/// Explicit state machine: choosing a step invalidates everything
/// downstream of it, and a variant can only ever be chosen out of
/// the set resolved for the currently selected major version.
/// Callers re-run their validation (the [`SelectionState::installable`]
/// predicate) after every transition.
#[derive(Debug, Clone, Default)]
pub enum SelectionState {
    #[default]
    NoVendor,
    VendorChosen {
        vendor: &'static Vendor,
    },
    /// A major version is selected but no build exists (or none
    /// is picked yet) for this platform. `variants` is the set
    /// resolved for `major`; it may legitimately be empty.
    MajorChosen {
        vendor: &'static Vendor,
        major: MajorVersionEntry,
        variants: Vec<PlatformVariant>,
    },
    VariantChosen {
        vendor: &'static Vendor,
        major: MajorVersionEntry,
        variants: Vec<PlatformVariant>,
        chosen: usize,
    },
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to a vendor page, dropping any previously
    /// selected major version and variant.
    pub fn choose_vendor(&mut self, vendor: &'static Vendor) {
        *self = SelectionState::VendorChosen { vendor };
    }

    /// Selects a major version, resolves its builds for `host` and
    /// auto-picks a default variant: the one flagged recommended,
    /// else the first. With no build for this platform the state
    /// stays at "major chosen" and nothing is installable.
    pub fn choose_major(&mut self, major: MajorVersionEntry, host: &HostPlatform) {
        let Some(vendor) = self.vendor() else {
            return;
        };
        let variants = resolve_variants(&major, host);
        let default = variants
            .iter()
            .position(|v| v.recommended)
            .or(if variants.is_empty() { None } else { Some(0) });
        *self = match default {
            Some(chosen) => SelectionState::VariantChosen {
                vendor,
                major,
                variants,
                chosen,
            },
            None => SelectionState::MajorChosen {
                vendor,
                major,
                variants,
            },
        };
    }

    /// Picks a variant by index into the currently resolved set.
    /// Returns false (leaving the state unchanged) if there is no
    /// resolved set or the index is out of range.
    pub fn choose_variant(&mut self, index: usize) -> bool {
        let (vendor, major, variants, previous) = match std::mem::take(self) {
            SelectionState::MajorChosen {
                vendor,
                major,
                variants,
            } => (vendor, major, variants, None),
            SelectionState::VariantChosen {
                vendor,
                major,
                variants,
                chosen,
            } => (vendor, major, variants, Some(chosen)),
            other => {
                *self = other;
                return false;
            }
        };

        let valid = index < variants.len();
        let chosen = if valid { Some(index) } else { previous };
        *self = match chosen {
            Some(chosen) => SelectionState::VariantChosen {
                vendor,
                major,
                variants,
                chosen,
            },
            None => SelectionState::MajorChosen {
                vendor,
                major,
                variants,
            },
        };
        valid
    }

    #[must_use]
    pub fn vendor(&self) -> Option<&'static Vendor> {
        match self {
            SelectionState::NoVendor => None,
            SelectionState::VendorChosen { vendor }
            | SelectionState::MajorChosen { vendor, .. }
            | SelectionState::VariantChosen { vendor, .. } => Some(*vendor),
        }
    }

    /// The resolved variant set for the selected major version.
    #[must_use]
    pub fn variants(&self) -> &[PlatformVariant] {
        match self {
            SelectionState::MajorChosen { variants, .. }
            | SelectionState::VariantChosen { variants, .. } => variants,
            SelectionState::NoVendor | SelectionState::VendorChosen { .. } => &[],
        }
    }

    /// True iff a complete, installable selection exists.
    #[must_use]
    pub fn installable(&self) -> bool {
        self.installable_variant().is_some()
    }

    #[must_use]
    pub fn installable_variant(&self) -> Option<&PlatformVariant> {
        match self {
            SelectionState::VariantChosen {
                variants, chosen, ..
            } => variants.get(*chosen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hashing::ChecksumKind, json::list::DownloadKind, vendor::VENDORS};

    fn variant(name: &str, os: &str, recommended: bool) -> PlatformVariant {
        PlatformVariant {
            name: name.to_owned(),
            url: format!("https://example.invalid/{name}.tar.gz"),
            checksum_type: ChecksumKind::Sha256,
            checksum_hash: "ab".repeat(32),
            download_type: DownloadKind::Archive,
            runtime_os: os.to_owned(),
            recommended,
        }
    }

    fn major_17() -> MajorVersionEntry {
        MajorVersionEntry {
            version: "17".to_owned(),
            recommended: true,
            runtimes: vec![
                variant("jre17-linux", "linux-x86_64", false),
                variant("jdk17-linux", "linux-x86_64", true),
                variant("jre17-win", "windows-x86_64", false),
            ],
        }
    }

    fn host() -> HostPlatform {
        HostPlatform::new("linux-x86_64")
    }

    #[test]
    fn choosing_vendor_resets_downstream_selection() {
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major_17(), &host());
        assert!(state.installable());

        state.choose_vendor(&VENDORS[0]);
        assert!(!state.installable());
        assert!(state.variants().is_empty());
        assert_eq!(state.vendor().map(|v| v.id), Some("net.minecraft.java"));
    }

    #[test]
    fn default_variant_prefers_recommended() {
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major_17(), &host());
        assert_eq!(
            state.installable_variant().map(|v| v.name.as_str()),
            Some("jdk17-linux")
        );
    }

    #[test]
    fn default_variant_falls_back_to_first() {
        let mut major = major_17();
        for runtime in &mut major.runtimes {
            runtime.recommended = false;
        }
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major, &host());
        assert_eq!(
            state.installable_variant().map(|v| v.name.as_str()),
            Some("jre17-linux")
        );
    }

    #[test]
    fn empty_resolved_set_is_not_installable() {
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major_17(), &HostPlatform::new("solaris-sparc64"));
        assert!(!state.installable());
        assert!(state.variants().is_empty());
        // Leaf action on an empty set is rejected, no panic
        assert!(!state.choose_variant(0));
    }

    #[test]
    fn choosing_new_major_replaces_variant_selection() {
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major_17(), &host());
        assert!(state.choose_variant(0));

        let major_21 = MajorVersionEntry {
            version: "21".to_owned(),
            recommended: false,
            runtimes: vec![variant("jre21-linux", "linux-x86_64", false)],
        };
        state.choose_major(major_21, &host());
        assert_eq!(
            state.installable_variant().map(|v| v.name.as_str()),
            Some("jre21-linux")
        );
    }

    #[test]
    fn out_of_range_index_keeps_previous_choice() {
        let mut state = SelectionState::new();
        state.choose_vendor(&VENDORS[1]);
        state.choose_major(major_17(), &host());
        let before = state.installable_variant().cloned();
        assert!(!state.choose_variant(99));
        assert_eq!(state.installable_variant().cloned(), before);
    }

    #[test]
    fn major_without_vendor_is_a_no_op() {
        let mut state = SelectionState::new();
        state.choose_major(major_17(), &host());
        assert!(!state.installable());
        assert!(matches!(state, SelectionState::NoVendor));
    }
}
