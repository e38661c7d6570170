use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

use jri_core::{file_utils, JsonDownloadError, JsonError, RequestError};

use crate::json::list::{MajorVersionEntry, VersionListJson};

const CATALOG_ERR_PREFIX: &str = "while loading the version list:\n";

/// Loading the list failed; distinct from the list being
/// legitimately empty (which is `Ok(&[])` from the catalog).
/// Callers should render "couldn't load" for this and
/// "no versions available" for the empty case.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{CATALOG_ERR_PREFIX}{0}")]
    Request(RequestError),
    #[error("{CATALOG_ERR_PREFIX}{0}")]
    Json(JsonError),
}

impl From<JsonDownloadError> for CatalogError {
    fn from(value: JsonDownloadError) -> Self {
        match value {
            JsonDownloadError::RequestError(n) => CatalogError::Request(n),
            JsonDownloadError::Json(n) => CatalogError::Json(n),
        }
    }
}

/// The external index service that publishes, per vendor id,
/// the ordered list of major Java versions. Injected so that
/// the catalog never cares where the metadata comes from.
pub trait MetadataSource {
    fn load_versions(
        &self,
        vendor_id: &str,
    ) -> impl Future<Output = Result<Vec<MajorVersionEntry>, JsonDownloadError>> + Send;
}

/// Fetches version lists from `<index_url>/<vendor_id>.json`.
pub struct HttpMetadataSource {
    index_url: String,
}

impl HttpMetadataSource {
    #[must_use]
    pub fn new(index_url: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
        }
    }
}

impl MetadataSource for HttpMetadataSource {
    async fn load_versions(
        &self,
        vendor_id: &str,
    ) -> Result<Vec<MajorVersionEntry>, JsonDownloadError> {
        let url = format!("{}/{vendor_id}.json", self.index_url);
        let json: VersionListJson = file_utils::download_file_to_json(&url, false).await?;
        Ok(json.versions)
    }
}

/// Per-vendor list of available major versions,
/// loaded lazily on first access and cached for the session.
pub struct VersionCatalog<S> {
    source: S,
    cache: HashMap<String, Vec<MajorVersionEntry>>,
}

impl<S: MetadataSource> VersionCatalog<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Returns the ordered version list for a vendor, fetching it
    /// on the first call and answering from cache afterwards.
    ///
    /// A failed fetch leaves the cache untouched, so a later call
    /// (or [`VersionCatalog::reload`]) can try again.
    pub async fn load(&mut self, vendor_id: &str) -> Result<&[MajorVersionEntry], CatalogError> {
        if !self.cache.contains_key(vendor_id) {
            let list = self.source.load_versions(vendor_id).await?;
            self.cache.insert(vendor_id.to_owned(), list);
        }
        Ok(self.cache.get(vendor_id).map_or(&[], Vec::as_slice))
    }

    /// Discards the cached list and fetches a fresh one.
    pub async fn reload(&mut self, vendor_id: &str) -> Result<&[MajorVersionEntry], CatalogError> {
        self.cache.remove(vendor_id);
        self.load(vendor_id).await
    }

    /// The entry flagged as recommended, for default selection.
    /// Only looks at what's already cached; no fetch side effects.
    #[must_use]
    pub fn recommended(&self, vendor_id: &str) -> Option<&MajorVersionEntry> {
        self.cache.get(vendor_id)?.iter().find(|n| n.recommended)
    }
}
