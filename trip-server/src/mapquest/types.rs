//! MapQuest API response DTOs.
//!
//! These types map directly to the MapQuest JSON responses. They use
//! `Option` liberally because MapQuest omits fields on error responses
//! rather than sending nulls.

use serde::Deserialize;

/// Response from `directions/v2/route`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// The computed route. Absent when the request failed.
    pub route: Option<RouteSummary>,

    /// Request status and error messages.
    pub info: Option<ResponseInfo>,
}

/// The route portion of a directions response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Total road distance in miles.
    pub distance: Option<f64>,

    /// Route polyline, present when `fullShape=true` was requested.
    pub shape: Option<RouteShape>,
}

/// Route polyline container.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteShape {
    /// `[latitude, longitude]` pairs tracing the route.
    pub shape_points: Vec<[f64; 2]>,
}

/// Request status block attached to every MapQuest response.
///
/// A `statuscode` of 0 means success even when the HTTP status is 200;
/// anything else carries error details in `messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseInfo {
    pub statuscode: Option<i64>,
    pub messages: Option<Vec<String>>,
}

/// Response from `geocoding/v1/address`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub results: Option<Vec<GeocodeResult>>,
}

/// One geocode result: a query and its candidate locations, best first.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub locations: Option<Vec<GeocodeLocation>>,
}

/// A candidate location for a geocoded address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeLocation {
    pub lat_lng: Option<LatLng>,
}

/// A latitude/longitude pair as MapQuest sends it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}
