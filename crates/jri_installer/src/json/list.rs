//! Serde models for the per-vendor version list published
//! by the metadata index.

use std::fmt::Display;

use serde::Deserialize;

use crate::hashing::ChecksumKind;

#[derive(Deserialize, Debug, Clone)]
pub struct VersionListJson {
    pub versions: Vec<MajorVersionEntry>,
}

/// One major Java release line (17, 21, ...) offered by a vendor,
/// with the concrete per-platform builds nested inside.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MajorVersionEntry {
    pub version: String,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub runtimes: Vec<PlatformVariant>,
}

impl Display for MajorVersionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// A concrete, OS/architecture-specific downloadable build.
/// Immutable once parsed; the acquisition task gets its own copy.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVariant {
    pub name: String,
    pub url: String,
    pub checksum_type: ChecksumKind,
    pub checksum_hash: String,
    pub download_type: DownloadKind,
    /// Platform key like `linux-x86_64` or `windows-arm64`.
    pub runtime_os: String,
    #[serde(default)]
    pub recommended: bool,
}

impl Display for PlatformVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    /// The url points to an index of many small files,
    /// each fetched and verified individually.
    Manifest,
    /// The url points to a single compressed bundle,
    /// extracted in place after verification.
    Archive,
}
