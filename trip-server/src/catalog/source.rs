//! Where the catalog comes from, and a refreshable shared handle to it.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::client::CatalogClient;
use super::error::CatalogError;
use super::sample::sample_catalog;
use super::types::Catalog;

/// Origin of catalog data.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The built-in sample catalog
    Sample,
    /// A local JSON file
    File(PathBuf),
    /// A remote JSON document
    Remote(CatalogClient),
}

impl CatalogSource {
    /// Load a fresh catalog from this source.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        match self {
            CatalogSource::Sample => Ok(sample_catalog()),
            CatalogSource::File(path) => Catalog::load(path),
            CatalogSource::Remote(client) => client.fetch().await,
        }
    }

    /// Whether periodic reloading can pick up changes.
    pub fn is_refreshable(&self) -> bool {
        !matches!(self, CatalogSource::Sample)
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Sample => "built-in sample".to_string(),
            CatalogSource::File(path) => format!("file {}", path.display()),
            CatalogSource::Remote(client) => format!("remote {}", client.url()),
        }
    }
}

/// Thread-safe catalog handle with support for background refresh.
///
/// Readers take an `Arc` snapshot, so a refresh never changes the catalog
/// underneath a quote that is already running.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
    source: CatalogSource,
}

impl SharedCatalog {
    /// Load the catalog from its source.
    ///
    /// This will fail if the source is unreachable or malformed.
    pub async fn load(source: CatalogSource) -> Result<Self, CatalogError> {
        let catalog = source.load().await?;
        info!(
            source = %source.describe(),
            destinations = catalog.destinations().len(),
            hotels = catalog.hotels().len(),
            "catalog loaded"
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            source,
        })
    }

    /// Wrap an already-built catalog (for tests and embedding).
    pub fn fixed(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            source: CatalogSource::Sample,
        }
    }

    /// Current catalog snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.inner.read().await.clone()
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Reload from the source, keeping the old catalog on failure.
    ///
    /// Returns the number of destinations in the new catalog.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let catalog = match self.source.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "catalog refresh failed");
                return Err(e);
            }
        };

        let count = catalog.destinations().len();
        *self.inner.write().await = Arc::new(catalog);
        Ok(count)
    }
}
