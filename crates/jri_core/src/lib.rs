//! Shared plumbing for the runtime installer crates:
//! error types, download helpers, logging macros,
//! progress/abort primitives and a bounded job runner.

mod error;
pub mod file_utils;
mod jobs;
pub mod print;
mod progress;

pub use error::{
    IntoIoError, IntoJsonError, IoError, JsonDownloadError, JsonError, JsonFileError, RequestError,
};
pub use file_utils::DownloadFileError;
pub use jobs::do_jobs_with_limit;
pub use progress::{AbortFlag, GenericProgress};
