//! MapQuest API client.
//!
//! This module provides an HTTP client for the MapQuest directions and
//! geocoding APIs, which resolve free-text addresses and compute road
//! routes between them.
//!
//! Key characteristics of MapQuest:
//! - Authentication is a `key` query parameter, not a header
//! - `directions/v2/route` with `fullShape=true` returns the route
//!   polyline as `[lat, lng]` shape point pairs
//! - Distances are in miles
//! - API-level failures arrive as HTTP 200 with a non-zero
//!   `info.statuscode`

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{MapQuestClient, MapQuestConfig};
pub use convert::{ConversionError, RouteGeometry, convert_directions, convert_geocode};
pub use error::MapQuestError;
pub use mock::MockMapQuestClient;
pub use types::{
    DirectionsResponse, GeocodeLocation, GeocodeResponse, GeocodeResult, LatLng, ResponseInfo,
    RouteShape, RouteSummary,
};
