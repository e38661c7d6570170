//! Download/verify tasks for acquiring a runtime build.
//!
//! A task is transient: created from a [`PlatformVariant`] at
//! confirmation time, run once, then discarded. It owns no state
//! beyond the single operation.

use std::{path::PathBuf, sync::mpsc::Sender};

use thiserror::Error;
use zip_extract::ZipExtractError;

use jri_core::{
    err, file_utils, impl_3_errs_jri, AbortFlag, GenericProgress, IoError, JsonError, RequestError,
};

use crate::{
    hashing::ChecksumKind,
    json::list::{DownloadKind, PlatformVariant},
};

mod archive;
mod manifest;

pub use archive::ArchiveDownloadTask;
pub use manifest::ManifestDownloadTask;

const TASK_ERR_PREFIX: &str = "while downloading the runtime:\n";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{TASK_ERR_PREFIX}{0}")]
    Request(#[from] RequestError),
    #[error("{TASK_ERR_PREFIX}{0}")]
    Json(#[from] JsonError),
    #[error("{TASK_ERR_PREFIX}{0}")]
    Io(#[from] IoError),
    #[error("{TASK_ERR_PREFIX}checksum mismatch for {name}:\nexpected {kind}:{expected}\ngot      {kind}:{got}")]
    ChecksumMismatch {
        name: String,
        kind: ChecksumKind,
        expected: String,
        got: String,
    },
    #[error("{TASK_ERR_PREFIX}couldn't extract tar.gz:\n{0}")]
    TarGzExtract(std::io::Error),
    #[error("{TASK_ERR_PREFIX}zip extract error:\n{0}")]
    ZipExtract(#[from] ZipExtractError),
    #[error("{TASK_ERR_PREFIX}unknown archive extension for: {0}")]
    UnknownExtension(String),
    /// Not a failure in itself, but follows the same
    /// cleanup path as one.
    #[error("aborted by user")]
    Aborted,
}

impl_3_errs_jri!(TaskError, Json, Request, Io);

/// The one download/verify operation behind an install,
/// dispatched once at construction from the variant's
/// download kind. Closed set, no plugin extensibility.
pub enum AcquisitionTask {
    Manifest(ManifestDownloadTask),
    Archive(ArchiveDownloadTask),
}

impl AcquisitionTask {
    #[must_use]
    pub fn new(variant: &PlatformVariant, dest: PathBuf) -> Self {
        match variant.download_type {
            DownloadKind::Manifest => {
                AcquisitionTask::Manifest(ManifestDownloadTask::new(variant, dest))
            }
            DownloadKind::Archive => {
                AcquisitionTask::Archive(ArchiveDownloadTask::new(variant, dest))
            }
        }
    }

    /// Fetches, verifies and materializes the runtime at the
    /// destination path. On any error (or abort) the task has
    /// stopped writing by the time this returns; deleting the
    /// destination afterwards is the caller's compensation.
    pub async fn run(
        &self,
        progress: Option<&Sender<GenericProgress>>,
        abort: &AbortFlag,
    ) -> Result<(), TaskError> {
        match self {
            AcquisitionTask::Manifest(task) => task.run(progress, abort).await,
            AcquisitionTask::Archive(task) => task.run(progress, abort).await,
        }
    }
}

/// Downloads a file chunk by chunk, checking the abort flag
/// between chunks so a user abort is observed promptly.
pub(crate) async fn fetch_bytes(url: &str, abort: &AbortFlag) -> Result<Vec<u8>, TaskError> {
    if abort.is_aborted() {
        return Err(TaskError::Aborted);
    }
    let mut response = file_utils::get(url, false).await?;
    let mut out = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(RequestError::from)? {
        if abort.is_aborted() {
            return Err(TaskError::Aborted);
        }
        out.extend_from_slice(&chunk);
    }
    Ok(out)
}

pub(crate) fn verify_checksum(
    kind: ChecksumKind,
    expected: &str,
    bytes: &[u8],
    name: &str,
) -> Result<(), TaskError> {
    let got = kind.hash(bytes);
    if got.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(TaskError::ChecksumMismatch {
            name: name.to_owned(),
            kind,
            expected: expected.to_owned(),
            got,
        })
    }
}

pub(crate) fn send_progress(progress: Option<&Sender<GenericProgress>>, update: GenericProgress) {
    if let Some(progress) = progress {
        if let Err(err) = progress.send(update) {
            err!("Error sending install progress: {err}\nThis should probably be safe to ignore");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_mismatch_reports_both_digests() {
        let expected = ChecksumKind::Sha256.hash(b"right bytes");
        let err = verify_checksum(ChecksumKind::Sha256, &expected, b"wrong bytes", "jre.tar.gz")
            .unwrap_err();
        let TaskError::ChecksumMismatch {
            name,
            expected: exp,
            got,
            ..
        } = err
        else {
            panic!("expected a checksum mismatch");
        };
        assert_eq!(name, "jre.tar.gz");
        assert_eq!(exp, expected);
        assert_eq!(got, ChecksumKind::Sha256.hash(b"wrong bytes"));
    }

    #[test]
    fn task_kind_follows_the_variant() {
        let variant = PlatformVariant {
            name: "jre".to_owned(),
            url: "https://example.invalid/jre.zip".to_owned(),
            checksum_type: ChecksumKind::Sha256,
            checksum_hash: "00".repeat(32),
            download_type: DownloadKind::Archive,
            runtime_os: "linux-x86_64".to_owned(),
            recommended: false,
        };
        assert!(matches!(
            AcquisitionTask::new(&variant, "/tmp/jre".into()),
            AcquisitionTask::Archive(_)
        ));

        let manifest = PlatformVariant {
            download_type: DownloadKind::Manifest,
            ..variant
        };
        assert!(matches!(
            AcquisitionTask::new(&manifest, "/tmp/jre".into()),
            AcquisitionTask::Manifest(_)
        ));
    }
}
