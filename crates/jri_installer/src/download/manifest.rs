use std::{
    path::{Path, PathBuf},
    sync::{mpsc::Sender, Mutex},
};

use jri_core::{
    do_jobs_with_limit, file_utils, pt, AbortFlag, GenericProgress, IntoIoError, IntoJsonError,
};

use crate::{
    hashing::ChecksumKind,
    json::files::{ManifestFile, ManifestJson},
    json::list::PlatformVariant,
};

use super::{fetch_bytes, send_progress, verify_checksum, TaskError};

// Too many parallel downloads make macOS error out.
#[cfg(target_os = "macos")]
const LIMIT: usize = 16;
#[cfg(not(target_os = "macos"))]
const LIMIT: usize = 64;

/// Fetches an index of many small files and materializes each
/// one at the destination. The index bytes are verified against
/// the task checksum; every listed file carries its own sha1,
/// verified before the file is written.
pub struct ManifestDownloadTask {
    url: String,
    dest: PathBuf,
    checksum_type: ChecksumKind,
    checksum_hash: String,
}

impl ManifestDownloadTask {
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
        send_progress(progress, GenericProgress::default());

        let manifest_bytes = fetch_bytes(&self.url, abort).await?;
        verify_checksum(
            self.checksum_type,
            &self.checksum_hash,
            &manifest_bytes,
            &self.url,
        )?;
        let json: ManifestJson = serde_json::from_slice(&manifest_bytes)
            .json(String::from_utf8_lossy(&manifest_bytes))?;

        tokio::fs::create_dir_all(&self.dest)
            .await
            .path(&self.dest)?;

        let num_files = json.files.len();
        let file_num = Mutex::new(0);

        let jobs: Vec<_> = json
            .files
            .iter()
            .map(|(file_name, file)| {
                self.install_file(progress, abort, &file_num, num_files, file_name, file)
            })
            .collect();
        _ = do_jobs_with_limit(jobs.into_iter(), LIMIT).await?;

        send_progress(progress, GenericProgress::finished());
        Ok(())
    }

    async fn install_file(
        &self,
        progress: Option<&Sender<GenericProgress>>,
        abort: &AbortFlag,
        file_num: &Mutex<usize>,
        num_files: usize,
        file_name: &str,
        file: &ManifestFile,
    ) -> Result<(), TaskError> {
        if abort.is_aborted() {
            return Err(TaskError::Aborted);
        }

        let file_path = self.dest.join(file_name);
        match file {
            ManifestFile::File {
                downloads,
                executable,
            } => {
                if let Some(parent) = file_path.parent() {
                    tokio::fs::create_dir_all(parent).await.path(parent)?;
                }
                let bytes = fetch_bytes(&downloads.raw.url, abort).await?;
                if let Some(sha1) = &downloads.raw.sha1 {
                    verify_checksum(ChecksumKind::Sha1, sha1, &bytes, file_name)?;
                }
                tokio::fs::write(&file_path, &bytes).await.path(&file_path)?;
                if *executable {
                    #[cfg(target_family = "unix")]
                    file_utils::set_executable(&file_path).await?;
                }
            }
            ManifestFile::Directory {} => {
                tokio::fs::create_dir_all(&file_path).await.path(&file_path)?;
            }
            ManifestFile::Link { target } => {
                make_link(target, &file_path).await?;
            }
        }

        let file_num = {
            let mut file_num = file_num.lock().unwrap();
            send_progress(
                progress,
                GenericProgress {
                    done: *file_num,
                    total: num_files,
                    message: Some(format!("Installed file: {file_name}")),
                    has_finished: false,
                },
            );
            *file_num += 1;
            *file_num
        } - 1;

        pt!(
            "{} ({file_num}/{num_files}): {file_name}",
            file.get_kind_name()
        );

        Ok(())
    }
}

#[cfg(target_family = "unix")]
async fn make_link(target: &str, link_path: &Path) -> Result<(), TaskError> {
    if let Some(parent) = link_path.parent() {
        tokio::fs::create_dir_all(parent).await.path(parent)?;
    }
    tokio::fs::symlink(target, link_path).await.path(link_path)?;
    Ok(())
}

#[cfg(not(target_family = "unix"))]
async fn make_link(target: &str, link_path: &Path) -> Result<(), TaskError> {
    // Windows symlinks need elevated privileges; runtimes
    // work without them, so just note the skip.
    pt!("Skipping link {link_path:?} -> {target}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::json::files::{ManifestFile, ManifestJson};

    #[test]
    fn parses_manifest_entry_kinds() {
        let json = r#"{
            "files": {
                "bin": { "type": "directory" },
                "bin/java": {
                    "type": "file",
                    "executable": true,
                    "downloads": {
                        "raw": {
                            "url": "https://example.invalid/java",
                            "sha1": "a9993e364706816aba3e25717850c26c9cd0d89d",
                            "size": 12345
                        }
                    }
                },
                "man/java.1": { "type": "link", "target": "../bin/java" }
            }
        }"#;
        let manifest: ManifestJson = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.files.len(), 3);
        assert!(matches!(
            manifest.files.get("bin"),
            Some(ManifestFile::Directory {})
        ));
        let Some(ManifestFile::File {
            downloads,
            executable,
        }) = manifest.files.get("bin/java")
        else {
            panic!("expected a file entry");
        };
        assert!(*executable);
        assert_eq!(downloads.raw.size, 12345);
        assert!(matches!(
            manifest.files.get("man/java.1"),
            Some(ManifestFile::Link { target }) if target == "../bin/java"
        ));
    }
}
