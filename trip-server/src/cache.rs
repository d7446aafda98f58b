//! Caching layer for MapQuest API responses.
//!
//! Routes and geocodes are deterministic for a given query over the cache
//! lifetime, so both are cached keyed by their normalized query text.
//! Misses fetch through a retry policy before reaching the network.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coord;
use crate::mapquest::{MapQuestClient, MapQuestError, RouteGeometry};
use crate::retry::RetryPolicy;

/// Cache key for routes: normalized (start, end) pair.
type RouteKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 1000,
        }
    }
}

/// Normalize a free-text location for use as a cache key.
///
/// "Los Angeles, CA" and " los angeles, ca " hit the same entry.
fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Cache for MapQuest API responses.
pub struct MapQuestCache {
    /// Route geometry keyed by normalized (start, end).
    routes: MokaCache<RouteKey, Arc<RouteGeometry>>,

    /// Geocoded coordinates keyed by normalized address.
    geocodes: MokaCache<String, Coord>,
}

impl MapQuestCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let geocodes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes, geocodes }
    }

    /// Get a cached route.
    pub async fn get_route(&self, key: &RouteKey) -> Option<Arc<RouteGeometry>> {
        self.routes.get(key).await
    }

    /// Insert a route into the cache.
    pub async fn insert_route(&self, key: RouteKey, entry: Arc<RouteGeometry>) {
        self.routes.insert(key, entry).await;
    }

    /// Get a cached geocode.
    pub async fn get_geocode(&self, address: &str) -> Option<Coord> {
        self.geocodes.get(address).await
    }

    /// Insert a geocode into the cache.
    pub async fn insert_geocode(&self, address: String, coord: Coord) {
        self.geocodes.insert(address, coord).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count() + self.geocodes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.geocodes.invalidate_all();
    }
}

/// MapQuest client with caching and retries.
///
/// Wraps a `MapQuestClient`; cache misses go to the network through the
/// retry policy.
pub struct CachedMapQuestClient {
    client: MapQuestClient,
    cache: MapQuestCache,
    retry: RetryPolicy,
}

impl CachedMapQuestClient {
    /// Create a new cached client.
    pub fn new(client: MapQuestClient, cache_config: &CacheConfig, retry: RetryPolicy) -> Self {
        Self {
            client,
            cache: MapQuestCache::new(cache_config),
            retry,
        }
    }

    /// Compute a route, using cache if available.
    pub async fn get_route(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Arc<RouteGeometry>, MapQuestError> {
        let key = (normalize(start), normalize(end));

        if let Some(cached) = self.cache.get_route(&key).await {
            return Ok(cached);
        }

        let geometry = self
            .retry
            .run("mapquest.get_route", || self.client.get_route(start, end))
            .await?;

        let entry = Arc::new(geometry);
        self.cache.insert_route(key, entry.clone()).await;

        Ok(entry)
    }

    /// Geocode an address, using cache if available.
    pub async fn geocode(&self, address: &str) -> Result<Coord, MapQuestError> {
        let key = normalize(address);

        if let Some(cached) = self.cache.get_geocode(&key).await {
            return Ok(cached);
        }

        let coord = self
            .retry
            .run("mapquest.geocode", || self.client.geocode(address))
            .await?;

        self.cache.insert_geocode(key, coord).await;

        Ok(coord)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &MapQuestClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
