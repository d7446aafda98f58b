//! Thread-safe station catalog with refresh support.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Station;

use super::csv::load_stations;
use super::error::CatalogError;

/// Shared, refreshable set of fuel stations.
///
/// Planning requests take a snapshot and work against it, so a refresh
/// never changes the data a request in flight is using.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<Arc<Vec<Arc<Station>>>>>,
    path: PathBuf,
}

impl StationCatalog {
    /// Create a catalog by loading the price file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let stations = load_stations(&path)?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            path,
        })
    }

    /// Create a catalog from already-built stations (for tests).
    pub fn from_stations(stations: Vec<Arc<Station>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            path: PathBuf::new(),
        }
    }

    /// Get the current station set.
    pub async fn snapshot(&self) -> Arc<Vec<Arc<Station>>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Get the number of stations in the catalog.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Reload the price file.
    ///
    /// On success, replaces the current station set. On failure, the
    /// existing set is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let stations = load_stations(&self.path)?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(stations);

        Ok(count)
    }
}
