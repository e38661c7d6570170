use std::{io::Cursor, path::PathBuf, sync::mpsc::Sender};

use jri_core::{file_utils, AbortFlag, GenericProgress};

use crate::{compression::extract_tar_gz, hashing::ChecksumKind, json::list::PlatformVariant};

use super::{fetch_bytes, send_progress, verify_checksum, TaskError};

/// Fetches a single compressed bundle, verifies it against the
/// task checksum and extracts it into the destination.
pub struct ArchiveDownloadTask {
    url: String,
    dest: PathBuf,
    checksum_type: ChecksumKind,
    checksum_hash: String,
}

impl ArchiveDownloadTask {
    #[must_use]
    pub fn new(variant: &PlatformVariant, dest: PathBuf) -> Self {
        Self {
            url: variant.url.clone(),
            dest,
            checksum_type: variant.checksum_type,
            checksum_hash: variant.checksum_hash.clone(),
        }
    }

    pub(crate) async fn run(
        &self,
        progress: Option<&Sender<GenericProgress>>,
        abort: &AbortFlag,
    ) -> Result<(), TaskError> {
        send_progress(
            progress,
            GenericProgress {
                done: 0,
                total: 2,
                message: Some("Getting compressed archive".to_owned()),
                has_finished: false,
            },
        );
        let bytes = fetch_bytes(&self.url, abort).await?;
        verify_checksum(self.checksum_type, &self.checksum_hash, &bytes, &self.url)?;

        send_progress(
            progress,
            GenericProgress {
                done: 1,
                total: 2,
                message: Some("Extracting archive".to_owned()),
                has_finished: false,
            },
        );
        if abort.is_aborted() {
            return Err(TaskError::Aborted);
        }
        if self.url.ends_with(".tar.gz") || self.url.ends_with(".tgz") {
            extract_tar_gz(&bytes, &self.dest).map_err(TaskError::TarGzExtract)?;
        } else if self.url.ends_with(".zip") {
            file_utils::extract_zip_archive(Cursor::new(&bytes), &self.dest, true)?;
        } else {
            return Err(TaskError::UnknownExtension(self.url.clone()));
        }

        send_progress(progress, GenericProgress::finished());
        Ok(())
    }
}
