//! Mock MapQuest client for testing without API access.
//!
//! Serves canned routes and geocodes as if they were live API
//! responses. Useful for development and tests without real MapQuest
//! credentials.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Coord;

use super::convert::RouteGeometry;
use super::error::MapQuestError;

/// Key for a canned route: normalized (start, end) pair.
type RouteKey = (String, String);

/// Mock MapQuest client backed by in-memory canned responses.
#[derive(Clone, Default)]
pub struct MockMapQuestClient {
    routes: Arc<RwLock<HashMap<RouteKey, RouteGeometry>>>,
    geocodes: Arc<RwLock<HashMap<String, Coord>>>,
}

/// Lookups ignore case and surrounding whitespace, matching how the
/// cache normalizes free-text locations.
fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

impl MockMapQuestClient {
    /// Create an empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned route between two locations.
    pub async fn add_route(&self, start: &str, end: &str, geometry: RouteGeometry) {
        let mut routes = self.routes.write().await;
        routes.insert((normalize(start), normalize(end)), geometry);
    }

    /// Register a canned geocode for an address.
    pub async fn add_geocode(&self, address: &str, coord: Coord) {
        let mut geocodes = self.geocodes.write().await;
        geocodes.insert(normalize(address), coord);
    }

    /// Mimics `MapQuestClient::get_route`.
    pub async fn get_route(
        &self,
        start: &str,
        end: &str,
    ) -> Result<RouteGeometry, MapQuestError> {
        let routes = self.routes.read().await;
        routes
            .get(&(normalize(start), normalize(end)))
            .cloned()
            .ok_or_else(|| {
                MapQuestError::NoResults(format!("route from {start} to {end}"))
            })
    }

    /// Mimics `MapQuestClient::geocode`.
    pub async fn geocode(&self, address: &str) -> Result<Coord, MapQuestError> {
        let geocodes = self.geocodes.read().await;
        geocodes
            .get(&normalize(address))
            .copied()
            .ok_or_else(|| MapQuestError::NoResults(format!("address: {address}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coord {
        Coord::new(lat, lng).unwrap()
    }

    #[tokio::test]
    async fn canned_route_round_trip() {
        let client = MockMapQuestClient::new();
        client
            .add_route(
                "Los Angeles, CA",
                "New York, NY",
                RouteGeometry {
                    waypoints: vec![coord(34.05, -118.24), coord(40.71, -74.01)],
                    distance_miles: 2789.5,
                },
            )
            .await;

        let geometry = client
            .get_route("los angeles, ca", "new york, ny")
            .await
            .unwrap();
        assert_eq!(geometry.waypoints.len(), 2);
        assert_eq!(geometry.distance_miles, 2789.5);
    }

    #[tokio::test]
    async fn unknown_route_returns_no_results() {
        let client = MockMapQuestClient::new();
        let result = client.get_route("Nowhere", "Elsewhere").await;
        assert!(matches!(result, Err(MapQuestError::NoResults(_))));
    }

    #[tokio::test]
    async fn geocode_normalizes_whitespace_and_case() {
        let client = MockMapQuestClient::new();
        client
            .add_geocode("350 5th Ave, New York, NY", coord(40.748, -73.985))
            .await;

        let c = client.geocode("  350 5TH AVE, NEW YORK, NY ").await.unwrap();
        assert_eq!(c.lat(), 40.748);
    }
}
