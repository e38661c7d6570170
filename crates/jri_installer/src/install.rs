use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
};

use thiserror::Error;

use jri_core::{err, info, AbortFlag, GenericProgress};

use crate::{
    download::{AcquisitionTask, TaskError},
    selection::SelectionState,
};

const INSTALL_ERR_PREFIX: &str = "while installing Java:\n";

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("{INSTALL_ERR_PREFIX}{0}")]
    Task(#[from] TaskError),
}

/// Terminal outcome of a confirmation. Exactly one of these is
/// reached before control returns to the caller; there is no
/// partial or streaming result.
#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    /// User abort. The destination has already been cleaned up.
    Aborted,
    /// Confirmation without an installable selection is a no-op.
    NoSelection,
}

/// Drives the end-to-end install: validated confirmation,
/// task dispatch, progress, and compensating deletion of the
/// destination on failure or abort.
pub struct InstallOrchestrator {
    install_root: PathBuf,
}

impl InstallOrchestrator {
    #[must_use]
    pub fn new(install_root: PathBuf) -> Self {
        Self { install_root }
    }

    /// Where a variant with this name gets installed.
    #[must_use]
    pub fn destination(&self, variant_name: &str) -> PathBuf {
        self.install_root.join(variant_name)
    }

    /// Runs the install for the current selection to completion.
    ///
    /// Resolves only once the task has reached one of its three
    /// terminal states. On failure or abort the destination path
    /// is deleted *after* the task has returned — the task runs
    /// every pending write to completion before returning, so the
    /// compensation can't race an in-flight write. A failed
    /// deletion is logged, never escalated. Nothing is retried
    /// automatically.
    pub async fn confirm(
        &self,
        selection: &SelectionState,
        progress: Option<Sender<GenericProgress>>,
        abort: &AbortFlag,
    ) -> Result<InstallOutcome, InstallError> {
        let Some(variant) = selection.installable_variant() else {
            return Ok(InstallOutcome::NoSelection);
        };

        let name = variant.name.clone();
        let dest = self.destination(&name);
        info!("Installing Java runtime {name} to {dest:?}");

        let task = AcquisitionTask::new(variant, dest.clone());
        match task.run(progress.as_ref(), abort).await {
            Ok(()) => {
                info!("Finished installing {name}");
                Ok(InstallOutcome::Installed(dest))
            }
            Err(TaskError::Aborted) => {
                info!("Install of {name} aborted, cleaning up");
                delete_path(&dest).await;
                Ok(InstallOutcome::Aborted)
            }
            Err(task_err) => {
                delete_path(&dest).await;
                Err(InstallError::Task(task_err))
            }
        }
    }
}

/// Compensating deletion of a (partially written) install path.
/// Unconditional on the failure/abort path; its own failure is
/// logged and swallowed.
async fn delete_path(path: &Path) {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => err!("couldn't clean up install path {path:?}: {err}"),
    }
}
