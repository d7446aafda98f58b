//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Coord;
use crate::store::RouteRecord;

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Free-text starting location, e.g. "350 5th Ave, New York, NY"
    pub start_location: String,

    /// Free-text destination
    pub end_location: String,

    /// Usable fuel tank capacity in gallons (defaults to server config)
    pub tank_capacity_gal: Option<f64>,

    /// Fuel economy in miles per gallon (defaults to server config)
    pub mpg: Option<f64>,
}

/// A fuel stop in a planned route.
#[derive(Debug, Serialize)]
pub struct FuelStopResult {
    /// OPIS truckstop id
    pub station_id: u32,

    /// Truckstop name
    pub name: String,

    /// Price per gallon at this stop
    pub price_per_gallon: Decimal,

    /// Gallons to purchase
    pub gallons: f64,

    /// Cost of this purchase, in dollars rounded to cents
    pub cost: Decimal,

    /// Distance along the route at which the stop occurs, in miles
    pub distance_miles: f64,

    /// Station coordinates
    pub position: Coord,
}

/// A planned route with its fuel stops.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: u64,
    pub start_location: String,
    pub end_location: String,
    pub start_coords: Coord,
    pub end_coords: Coord,

    /// Road distance in miles
    pub total_distance_miles: f64,

    /// Total fuel expenditure in dollars
    pub total_fuel_cost: Decimal,

    pub fuel_stops: Vec<FuelStopResult>,

    /// Route polyline for map display
    pub waypoints: Vec<Coord>,

    pub created_at: DateTime<Utc>,
}

impl RouteResponse {
    pub fn from_record(record: &RouteRecord) -> Self {
        Self {
            id: record.id.0,
            start_location: record.start_location.clone(),
            end_location: record.end_location.clone(),
            start_coords: record.start_coords,
            end_coords: record.end_coords,
            total_distance_miles: record.total_distance_miles,
            total_fuel_cost: record.total_fuel_cost,
            fuel_stops: record
                .stops
                .iter()
                .map(|stop| FuelStopResult {
                    station_id: stop.station_id.0,
                    name: stop.name.clone(),
                    price_per_gallon: stop.price_per_gallon,
                    gallons: stop.gallons,
                    cost: stop.cost,
                    distance_miles: stop.distance_miles,
                    position: stop.position,
                })
                .collect(),
            waypoints: record.waypoints.clone(),
            created_at: record.created_at,
        }
    }
}

/// Response listing all stored routes.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResponse>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
