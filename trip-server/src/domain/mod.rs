//! Domain types for the road-trip fuel planner.
//!
//! This module contains the core domain model types that represent
//! validated trip data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod coord;
mod error;
mod station;
mod vehicle;

pub use coord::{Coord, EARTH_RADIUS_MILES, InvalidCoord, MILES_PER_DEGREE_LAT};
pub use error::PlanError;
pub use station::{Station, StationId};
pub use vehicle::VehicleProfile;
