//! In-memory store of planned routes.
//!
//! Each successful planning request is recorded so it can be listed,
//! fetched, or deleted later. Storage is process-local; restarting the
//! server clears it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::{Coord, StationId};

/// Identifier for a stored route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u64);

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One refuelling stop as stored on a route record.
#[derive(Debug, Clone)]
pub struct StoredStop {
    pub station_id: StationId,
    pub name: String,
    pub price_per_gallon: Decimal,
    pub gallons: f64,
    pub cost: Decimal,
    pub distance_miles: f64,
    pub position: Coord,
}

/// A planned route with its fuel stops.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub id: RouteId,
    pub start_location: String,
    pub end_location: String,
    pub start_coords: Coord,
    pub end_coords: Coord,
    /// Road distance reported by the routing provider, in miles.
    pub total_distance_miles: f64,
    pub total_fuel_cost: Decimal,
    pub stops: Vec<StoredStop>,
    /// Route polyline for map display.
    pub waypoints: Vec<Coord>,
    pub created_at: DateTime<Utc>,
}

/// Route record before an id has been assigned.
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub start_location: String,
    pub end_location: String,
    pub start_coords: Coord,
    pub end_coords: Coord,
    pub total_distance_miles: f64,
    pub total_fuel_cost: Decimal,
    pub stops: Vec<StoredStop>,
    pub waypoints: Vec<Coord>,
}

struct StoreInner {
    routes: HashMap<RouteId, Arc<RouteRecord>>,
    next_id: u64,
}

/// Thread-safe in-memory route store.
#[derive(Clone)]
pub struct RouteStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl RouteStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                routes: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Store a new route, assigning it the next id.
    pub async fn insert(&self, route: NewRoute) -> Arc<RouteRecord> {
        let mut guard = self.inner.write().await;
        let id = RouteId(guard.next_id);
        guard.next_id += 1;

        let record = Arc::new(RouteRecord {
            id,
            start_location: route.start_location,
            end_location: route.end_location,
            start_coords: route.start_coords,
            end_coords: route.end_coords,
            total_distance_miles: route.total_distance_miles,
            total_fuel_cost: route.total_fuel_cost,
            stops: route.stops,
            waypoints: route.waypoints,
            created_at: Utc::now(),
        });
        guard.routes.insert(id, record.clone());

        record
    }

    /// Fetch a route by id.
    pub async fn get(&self, id: RouteId) -> Option<Arc<RouteRecord>> {
        let guard = self.inner.read().await;
        guard.routes.get(&id).cloned()
    }

    /// All stored routes, newest first.
    pub async fn list(&self) -> Vec<Arc<RouteRecord>> {
        let guard = self.inner.read().await;
        let mut routes: Vec<_> = guard.routes.values().cloned().collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        routes
    }

    /// Delete a route. Returns true if it existed.
    pub async fn delete(&self, id: RouteId) -> bool {
        let mut guard = self.inner.write().await;
        guard.routes.remove(&id).is_some()
    }

    /// Number of stored routes.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.routes.len()
    }
}

impl Default for RouteStore {
    fn default() -> Self {
        Self::new()
    }
}
