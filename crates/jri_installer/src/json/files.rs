//! Serde models for a manifest download: an index document
//! listing every file of the runtime, with per-file checksums.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ManifestJson {
    pub files: BTreeMap<String, ManifestFile>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ManifestFile {
    File {
        downloads: FileDownloads,
        #[serde(default)]
        executable: bool,
    },
    Directory {},
    Link {
        target: String,
    },
}

impl ManifestFile {
    #[must_use]
    pub fn get_kind_name(&self) -> &'static str {
        match self {
            ManifestFile::File { .. } => "file",
            ManifestFile::Directory {} => "directory",
            ManifestFile::Link { .. } => "link",
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct FileDownloads {
    pub raw: RawDownload,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawDownload {
    pub url: String,
    pub sha1: Option<String>,
    #[serde(default)]
    pub size: u64,
}
