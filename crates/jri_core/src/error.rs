use std::path::{Path, PathBuf};

use thiserror::Error;

/// An IO error attached to the path it happened at.
///
/// Produced by calling `.path(path)` (or `.dir(path)` for
/// directory listing) on a `Result<T, std::io::Error>`,
/// through the [`IntoIoError`] trait.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("at path {path:?}, error {error}")]
    Io { error: String, path: PathBuf },
    #[error("couldn't read directory {parent:?}, error {error}")]
    ReadDir { error: String, parent: PathBuf },
}

pub trait IntoIoError<T> {
    fn path(self, p: impl AsRef<Path>) -> Result<T, IoError>;
    fn dir(self, p: impl AsRef<Path>) -> Result<T, IoError>;
}

impl<T> IntoIoError<T> for Result<T, std::io::Error> {
    fn path(self, p: impl AsRef<Path>) -> Result<T, IoError> {
        self.map_err(|error| IoError::Io {
            error: error.to_string(),
            path: p.as_ref().to_owned(),
        })
    }

    fn dir(self, p: impl AsRef<Path>) -> Result<T, IoError> {
        self.map_err(|error| IoError::ReadDir {
            error: error.to_string(),
            parent: p.as_ref().to_owned(),
        })
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("download failed with code {code}\nurl: {url}")]
    DownloadError {
        code: reqwest::StatusCode,
        url: String,
    },
    #[error("reqwest library error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

/// A JSON parsing error, carrying (a prefix of) the text
/// that failed to parse. Produced by calling `.json(text)`
/// on a `Result<T, serde_json::Error>`.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("couldn't parse JSON: {error}\njson (truncated): {json}")]
    SerdeError { error: String, json: String },
}

pub trait IntoJsonError<T> {
    fn json(self, json: impl AsRef<str>) -> Result<T, JsonError>;
}

impl<T> IntoJsonError<T> for Result<T, serde_json::Error> {
    fn json(self, json: impl AsRef<str>) -> Result<T, JsonError> {
        self.map_err(|error| JsonError::SerdeError {
            error: error.to_string(),
            json: json.as_ref().chars().take(1024).collect(),
        })
    }
}

/// Error when downloading and parsing a JSON document in one go.
#[derive(Debug, Error)]
pub enum JsonDownloadError {
    #[error("{0}")]
    RequestError(#[from] RequestError),
    #[error("{0}")]
    Json(#[from] JsonError),
}

/// Error when reading and parsing a JSON file on disk.
#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("{0}")]
    Json(#[from] JsonError),
    #[error("{0}")]
    Io(#[from] IoError),
}

/// Implements `From<JsonDownloadError>` and `From<JsonFileError>`
/// for an error enum that already has variants wrapping
/// [`JsonError`], [`RequestError`] and [`IoError`].
#[macro_export]
macro_rules! impl_3_errs_jri {
    ($err:ident, $json:ident, $request:ident, $io:ident) => {
        impl From<$crate::JsonDownloadError> for $err {
            fn from(value: $crate::JsonDownloadError) -> Self {
                match value {
                    $crate::JsonDownloadError::RequestError(n) => $err::$request(n),
                    $crate::JsonDownloadError::Json(n) => $err::$json(n),
                }
            }
        }

        impl From<$crate::JsonFileError> for $err {
            fn from(value: $crate::JsonFileError) -> Self {
                match value {
                    $crate::JsonFileError::Json(n) => $err::$json(n),
                    $crate::JsonFileError::Io(n) => $err::$io(n),
                }
            }
        }
    };
}
