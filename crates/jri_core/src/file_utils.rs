use std::{
    io::{Read, Seek},
    path::Path,
    sync::LazyLock,
};

use serde::de::DeserializeOwned;
use zip_extract::ZipExtractError;

use crate::{
    error::{IntoIoError, IntoJsonError, IoError},
    JsonDownloadError, RequestError,
};

pub const USER_AGENT: &str = concat!("jri/", env!("CARGO_PKG_VERSION"));

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Sends a GET request and checks the status code.
///
/// Non-success status codes are turned into
/// [`RequestError::DownloadError`] so callers can
/// match on the HTTP code.
pub async fn get(url: &str, user_agent: bool) -> Result<reqwest::Response, RequestError> {
    let mut request = CLIENT.get(url);
    if user_agent {
        request = request.header("User-Agent", USER_AGENT);
    }
    let response = request.send().await?;
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(RequestError::DownloadError {
            code: response.status(),
            url: url.to_owned(),
        })
    }
}

pub async fn download_file_to_bytes(url: &str, user_agent: bool) -> Result<Vec<u8>, RequestError> {
    let response = get(url, user_agent).await?;
    Ok(response.bytes().await?.to_vec())
}

pub async fn download_file_to_string(url: &str, user_agent: bool) -> Result<String, RequestError> {
    let response = get(url, user_agent).await?;
    Ok(response.text().await?)
}

pub async fn download_file_to_json<T: DeserializeOwned>(
    url: &str,
    user_agent: bool,
) -> Result<T, JsonDownloadError> {
    let text = download_file_to_string(url, user_agent).await?;
    Ok(serde_json::from_str(&text).json(&text)?)
}

pub async fn download_file_to_path(
    url: &str,
    user_agent: bool,
    path: &Path,
) -> Result<(), DownloadFileError> {
    let bytes = download_file_to_bytes(url, user_agent).await?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.path(parent)?;
    }
    tokio::fs::write(path, &bytes).await.path(path)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadFileError {
    #[error("{0}")]
    Request(#[from] RequestError),
    #[error("{0}")]
    Io(#[from] IoError),
}

/// Extracts a zip archive into `dir`.
///
/// If `strip_toplevel` is true and the archive wraps everything
/// in a single top-level directory, that directory is skipped.
pub fn extract_zip_archive<R: Read + Seek>(
    archive: R,
    dir: &Path,
    strip_toplevel: bool,
) -> Result<(), ZipExtractError> {
    zip_extract::extract(archive, dir, strip_toplevel)
}

#[cfg(target_family = "unix")]
pub async fn set_executable(path: &Path) -> Result<(), IoError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = tokio::fs::metadata(path).await.path(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    tokio::fs::set_permissions(path, perms).await.path(path)?;
    Ok(())
}

/// Directory for logs and other data of ours,
/// e.g. `~/.local/share/jri` on Linux.
pub fn get_data_dir() -> Option<std::path::PathBuf> {
    let dir = dirs::data_dir()?.join("jri");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
