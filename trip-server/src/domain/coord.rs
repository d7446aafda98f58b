//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean earth radius in miles, spherical approximation.
///
/// Good enough for corridor filtering and along-route distances; this is
/// not a billing-grade geodesic.
pub const EARTH_RADIUS_MILES: f64 = 3_958.8;

/// Miles spanned by one degree of latitude on the spherical earth.
pub const MILES_PER_DEGREE_LAT: f64 = EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoord {
    reason: &'static str,
}

/// A validated geographic coordinate (decimal degrees).
///
/// Latitude is within [-90, 90], longitude within [-180, 180], both finite.
/// Any `Coord` value is valid by construction.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coord;
///
/// let la = Coord::new(34.0522, -118.2437).unwrap();
/// assert_eq!(la.lat(), 34.0522);
///
/// assert!(Coord::new(91.0, 0.0).is_err());
/// assert!(Coord::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoord", into = "RawCoord")]
pub struct Coord {
    lat: f64,
    lng: f64,
}

/// Serde shape for [`Coord`]; validation runs on deserialization.
#[derive(Serialize, Deserialize)]
struct RawCoord {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoord> for Coord {
    type Error = InvalidCoord;

    fn try_from(raw: RawCoord) -> Result<Self, InvalidCoord> {
        Coord::new(raw.lat, raw.lng)
    }
}

impl From<Coord> for RawCoord {
    fn from(c: Coord) -> Self {
        RawCoord {
            lat: c.lat,
            lng: c.lng,
        }
    }
}

impl Coord {
    /// Construct a coordinate, validating ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoord> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoord {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoord {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other` in miles (haversine formula).
    pub fn haversine_miles(&self, other: &Coord) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}
