use crate::json::list::{MajorVersionEntry, PlatformVariant};

/// The OS/architecture key the metadata uses to mark which
/// build runs where, e.g. `linux-x86_64` or `windows-arm64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub name: String,
}

impl HostPlatform {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn current() -> Self {
        let os = if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "macos") {
            "mac-os"
        } else {
            "linux"
        };
        let arch = if cfg!(target_arch = "x86_64") {
            "x86_64"
        } else if cfg!(target_arch = "aarch64") {
            "arm64"
        } else if cfg!(target_arch = "x86") {
            "i386"
        } else {
            std::env::consts::ARCH
        };
        Self::new(format!("{os}-{arch}"))
    }
}

/// Filters a major version's builds down to the ones that run
/// on `host`. Pure function of its inputs, order preserving.
///
/// An empty result means "no build for this platform" and is a
/// legitimate terminal state, not an error.
#[must_use]
pub fn resolve_variants(entry: &MajorVersionEntry, host: &HostPlatform) -> Vec<PlatformVariant> {
    entry
        .runtimes
        .iter()
        .filter(|runtime| runtime.runtime_os == host.name)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hashing::ChecksumKind, json::list::DownloadKind};

    fn variant(name: &str, os: &str) -> PlatformVariant {
        PlatformVariant {
            name: name.to_owned(),
            url: format!("https://example.invalid/{name}.tar.gz"),
            checksum_type: ChecksumKind::Sha256,
            checksum_hash: "00".repeat(32),
            download_type: DownloadKind::Archive,
            runtime_os: os.to_owned(),
            recommended: false,
        }
    }

    fn entry() -> MajorVersionEntry {
        MajorVersionEntry {
            version: "17".to_owned(),
            recommended: true,
            runtimes: vec![
                variant("jre17-linux", "linux-x86_64"),
                variant("jre17-win", "windows-x86_64"),
                variant("jdk17-linux", "linux-x86_64"),
            ],
        }
    }

    #[test]
    fn filters_by_host_and_keeps_order() {
        let resolved = resolve_variants(&entry(), &HostPlatform::new("linux-x86_64"));
        let names: Vec<&str> = resolved.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["jre17-linux", "jdk17-linux"]);
    }

    #[test]
    fn no_build_for_platform_is_empty_not_an_error() {
        let resolved = resolve_variants(&entry(), &HostPlatform::new("solaris-sparc64"));
        assert!(resolved.is_empty());
    }
}
