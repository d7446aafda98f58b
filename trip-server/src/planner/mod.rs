//! Fuel-stop planning core.
//!
//! Answers: "driving this route in this vehicle, where should I buy fuel
//! and how much, to spend as little as possible without running dry?"
//!
//! The pipeline has three pure stages:
//! 1. [`stations_near_route`] filters the catalog to stations within a
//!    lateral corridor of the route.
//! 2. [`project`] collapses the surviving stations onto a single
//!    distance-along-route axis.
//! 3. [`optimize`] picks the stops and purchase amounts that minimise
//!    total fuel cost subject to the vehicle's range.
//!
//! Every stage is a side-effect-free function over immutable inputs, so
//! concurrent planning requests never interfere.

mod config;
mod corridor;
mod optimizer;
mod plan;
mod projector;

use std::sync::Arc;

use crate::domain::{Coord, PlanError, Station, VehicleProfile};

pub use config::PlannerConfig;
pub use corridor::stations_near_route;
pub use optimizer::optimize;
pub use plan::{FuelStop, StopPlan};
pub use projector::{ProjectedStation, cumulative_distances, project, route_length_miles};

/// Plan the cheapest feasible set of fuel stops for a route.
///
/// Composes the corridor filter, the projector and the optimizer over
/// already-resolved inputs. The optimization axis is the cumulative length
/// of the waypoint polyline; callers wanting to report the provider's road
/// distance keep that number separately.
pub fn plan_stops(
    waypoints: &[Coord],
    stations: &[Arc<Station>],
    profile: &VehicleProfile,
    corridor_miles: f64,
) -> Result<StopPlan, PlanError> {
    let candidates = stations_near_route(waypoints, stations, corridor_miles)?;
    let projected = project(waypoints, &candidates)?;
    let total = route_length_miles(waypoints);
    optimize(&projected, total, profile)
}
