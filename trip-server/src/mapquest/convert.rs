//! Conversion from MapQuest DTOs to domain types.
//!
//! Raw responses become validated geometry here: coordinates are checked,
//! degenerate polylines rejected, and the best geocode candidate picked.

use crate::domain::Coord;

use super::types::{DirectionsResponse, GeocodeResponse};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A shape point or geocode result had an out-of-range coordinate
    #[error("invalid coordinate: {0}")]
    InvalidCoord(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Route shape too short to describe a journey
    #[error("route shape has {0} points, need at least 2")]
    DegenerateShape(usize),

    /// Distance absent, non-finite or negative
    #[error("invalid route distance: {0}")]
    InvalidDistance(String),
}

/// A road route as validated domain geometry.
#[derive(Debug, Clone)]
pub struct RouteGeometry {
    /// Polyline waypoints in travel order.
    pub waypoints: Vec<Coord>,

    /// Road distance as reported by the provider, in miles. Slightly
    /// longer than the polyline length since the polyline is sampled.
    pub distance_miles: f64,
}

/// Convert a directions response into validated route geometry.
pub fn convert_directions(
    response: &DirectionsResponse,
) -> Result<RouteGeometry, ConversionError> {
    let route = response
        .route
        .as_ref()
        .ok_or(ConversionError::MissingField("route"))?;

    let shape = route
        .shape
        .as_ref()
        .ok_or(ConversionError::MissingField("route.shape"))?;

    if shape.shape_points.len() < 2 {
        return Err(ConversionError::DegenerateShape(shape.shape_points.len()));
    }

    let waypoints = shape
        .shape_points
        .iter()
        .map(|[lat, lng]| {
            Coord::new(*lat, *lng)
                .map_err(|e| ConversionError::InvalidCoord(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let distance_miles = route
        .distance
        .ok_or(ConversionError::MissingField("route.distance"))?;
    if !distance_miles.is_finite() || distance_miles < 0.0 {
        return Err(ConversionError::InvalidDistance(distance_miles.to_string()));
    }

    Ok(RouteGeometry {
        waypoints,
        distance_miles,
    })
}

/// Convert a geocode response into a coordinate.
///
/// MapQuest orders candidates best first; only the top one is used.
pub fn convert_geocode(response: &GeocodeResponse) -> Result<Coord, ConversionError> {
    let lat_lng = response
        .results
        .as_deref()
        .and_then(|results| results.first())
        .and_then(|result| result.locations.as_deref())
        .and_then(|locations| locations.first())
        .and_then(|location| location.lat_lng)
        .ok_or(ConversionError::MissingField(
            "results[0].locations[0].latLng",
        ))?;

    Coord::new(lat_lng.lat, lat_lng.lng)
        .map_err(|e| ConversionError::InvalidCoord(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapquest::types::{GeocodeLocation, GeocodeResult, LatLng, RouteShape, RouteSummary};

    fn directions(distance: Option<f64>, points: Vec<[f64; 2]>) -> DirectionsResponse {
        DirectionsResponse {
            route: Some(RouteSummary {
                distance,
                shape: Some(RouteShape {
                    shape_points: points,
                }),
            }),
            info: None,
        }
    }

    #[test]
    fn converts_valid_directions() {
        let response = directions(
            Some(1234.5),
            vec![[34.0, -118.0], [35.0, -110.0], [40.7, -74.0]],
        );
        let geometry = convert_directions(&response).unwrap();
        assert_eq!(geometry.waypoints.len(), 3);
        assert_eq!(geometry.distance_miles, 1234.5);
        assert_eq!(geometry.waypoints[0].lat(), 34.0);
    }

    #[test]
    fn rejects_missing_route() {
        let response = DirectionsResponse {
            route: None,
            info: None,
        };
        assert!(matches!(
            convert_directions(&response),
            Err(ConversionError::MissingField("route"))
        ));
    }

    #[test]
    fn rejects_single_point_shape() {
        let response = directions(Some(10.0), vec![[34.0, -118.0]]);
        assert!(matches!(
            convert_directions(&response),
            Err(ConversionError::DegenerateShape(1))
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        let response = directions(Some(10.0), vec![[34.0, -118.0], [95.0, -110.0]]);
        assert!(matches!(
            convert_directions(&response),
            Err(ConversionError::InvalidCoord(_))
        ));
    }

    #[test]
    fn rejects_negative_distance() {
        let response = directions(Some(-5.0), vec![[34.0, -118.0], [35.0, -110.0]]);
        assert!(matches!(
            convert_directions(&response),
            Err(ConversionError::InvalidDistance(_))
        ));
    }

    #[test]
    fn geocode_uses_first_location() {
        let response = GeocodeResponse {
            results: Some(vec![GeocodeResult {
                locations: Some(vec![
                    GeocodeLocation {
                        lat_lng: Some(LatLng {
                            lat: 34.0522,
                            lng: -118.2437,
                        }),
                    },
                    GeocodeLocation {
                        lat_lng: Some(LatLng { lat: 0.0, lng: 0.0 }),
                    },
                ]),
            }]),
        };
        let coord = convert_geocode(&response).unwrap();
        assert_eq!(coord.lat(), 34.0522);
        assert_eq!(coord.lng(), -118.2437);
    }

    #[test]
    fn geocode_empty_results_is_missing_field() {
        let response = GeocodeResponse {
            results: Some(vec![]),
        };
        assert!(matches!(
            convert_geocode(&response),
            Err(ConversionError::MissingField(_))
        ));
    }
}
