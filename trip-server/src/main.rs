use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedMapQuestClient};
use trip_server::catalog::StationCatalog;
use trip_server::domain::VehicleProfile;
use trip_server::mapquest::{MapQuestClient, MapQuestConfig};
use trip_server::planner::PlannerConfig;
use trip_server::retry::RetryPolicy;
use trip_server::store::RouteStore;
use trip_server::web::{AppState, create_router};

/// How often to reload the station price file (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Read an optional positive float from the environment.
fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get configuration from environment
    let api_key = std::env::var("MAPQUEST_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("MAPQUEST_API_KEY not set, API calls will fail");
        String::new()
    });
    let csv_path =
        std::env::var("STATIONS_CSV").unwrap_or_else(|_| "data/fuel-prices.csv".to_string());

    let mut planner_config = PlannerConfig::default();
    if let Some(miles) = env_f64("MAX_LATERAL_MILES") {
        planner_config.max_lateral_miles = miles;
    }
    let tank = env_f64("TANK_CAPACITY_GAL").unwrap_or(planner_config.default_vehicle.tank_capacity_gal);
    let mpg = env_f64("MPG").unwrap_or(planner_config.default_vehicle.mpg);
    planner_config.default_vehicle =
        VehicleProfile::new(tank, mpg).expect("Invalid vehicle profile from environment");

    // Create MapQuest client with caching and retries
    let mapquest_config = MapQuestConfig::new(&api_key);
    let mapquest_client =
        MapQuestClient::new(mapquest_config).expect("Failed to create MapQuest client");
    let cached_mapquest = CachedMapQuestClient::new(
        mapquest_client,
        &CacheConfig::default(),
        RetryPolicy::default(),
    );

    // Load the station catalog (fail fast if unavailable)
    let catalog = StationCatalog::load(&csv_path).expect("Failed to load station catalog");
    tracing::info!(stations = catalog.len().await, path = %csv_path, "loaded station catalog");

    // Spawn background task to reload prices daily
    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => tracing::info!(stations = count, "refreshed station catalog"),
                Err(e) => tracing::error!(error = %e, "failed to refresh station catalog"),
            }
        }
    });

    // Build app state
    let state = AppState::new(cached_mapquest, catalog, RouteStore::new(), planner_config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
    tracing::info!("Trip planner listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
