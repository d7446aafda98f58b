//! MapQuest HTTP client.
//!
//! Provides async methods for the directions and geocoding APIs.
//! Handles authentication, concurrency limiting, and conversion to
//! domain types.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::Coord;

use super::convert::{RouteGeometry, convert_directions, convert_geocode};
use super::error::MapQuestError;
use super::types::{DirectionsResponse, GeocodeResponse, ResponseInfo};

/// Default base URL for the MapQuest API.
const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the MapQuest client.
#[derive(Debug, Clone)]
pub struct MapQuestConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production MapQuest)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapQuestConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MapQuest API client.
///
/// Provides methods for computing routes and geocoding addresses.
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MapQuestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl MapQuestClient {
    /// Create a new MapQuest client with the given configuration.
    pub fn new(config: MapQuestConfig) -> Result<Self, MapQuestError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Compute the fastest road route between two free-text locations.
    ///
    /// Requests the full route shape so the caller gets a polyline dense
    /// enough for corridor filtering.
    pub async fn get_route(
        &self,
        start: &str,
        end: &str,
    ) -> Result<RouteGeometry, MapQuestError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapQuestError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/directions/v2/route", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("from", start),
                ("to", end),
                ("routeType", "fastest"),
                ("fullShape", "true"),
            ])
            .send()
            .await?;

        let body = check_http_status(response).await?;

        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| MapQuestError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        check_info_status(directions.info.as_ref(), || {
            format!("route from {start} to {end}")
        })?;

        Ok(convert_directions(&directions)?)
    }

    /// Resolve a free-text address to a coordinate.
    pub async fn geocode(&self, address: &str) -> Result<Coord, MapQuestError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapQuestError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/geocoding/v1/address", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("location", address)])
            .send()
            .await?;

        let body = check_http_status(response).await?;

        let geocode: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| MapQuestError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        convert_geocode(&geocode).map_err(|_| {
            MapQuestError::NoResults(format!("address: {address}"))
        })
    }
}

/// Map transport-level HTTP failures to typed errors, returning the body.
async fn check_http_status(response: reqwest::Response) -> Result<String, MapQuestError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(MapQuestError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(MapQuestError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MapQuestError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

/// MapQuest reports many failures as HTTP 200 with a non-zero statuscode.
fn check_info_status(
    info: Option<&ResponseInfo>,
    context: impl FnOnce() -> String,
) -> Result<(), MapQuestError> {
    let Some(info) = info else { return Ok(()) };

    match info.statuscode {
        None | Some(0) => Ok(()),
        Some(code) => {
            let message = info
                .messages
                .as_deref()
                .and_then(|m| m.first())
                .cloned()
                .unwrap_or_else(|| format!("statuscode {code} for {}", context()));
            Err(MapQuestError::ApiError {
                status: code.unsigned_abs().min(u16::MAX as u64) as u16,
                message,
            })
        }
    }
}
