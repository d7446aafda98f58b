//! Fuel station catalog types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Coord;

/// Unique identifier of a fuel station (the OPIS truckstop id).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub u32);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fuel station with location and pricing information.
///
/// Owned by the station catalog and treated as read-only by the planner.
/// The price is a fixed-point decimal in dollars per gallon — money is
/// never represented as binary floating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Rack identifier used by the upstream OPIS pricing feed.
    pub rack_id: u32,
    /// Retail price in dollars per gallon.
    pub price_per_gallon: Decimal,
    pub position: Coord,
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, {}", self.name, self.city, self.state)
    }
}
