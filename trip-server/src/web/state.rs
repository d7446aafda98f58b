//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMapQuestClient;
use crate::catalog::StationCatalog;
use crate::planner::PlannerConfig;
use crate::store::RouteStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached MapQuest client
    pub mapquest: Arc<CachedMapQuestClient>,

    /// Fuel station catalog
    pub catalog: StationCatalog,

    /// Stored route plans
    pub store: RouteStore,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        mapquest: CachedMapQuestClient,
        catalog: StationCatalog,
        store: RouteStore,
        config: PlannerConfig,
    ) -> Self {
        Self {
            mapquest: Arc::new(mapquest),
            catalog,
            store,
            config: Arc::new(config),
        }
    }
}
