//! Route projection: 2D station positions onto a 1D along-route axis.
//!
//! Once the corridor filter has bounded lateral deviation, a station can
//! be summarised by the cumulative route distance of its nearest waypoint.
//! The optimizer then reasons over a single ordered axis.

use std::sync::Arc;

use crate::domain::{Coord, PlanError, Station};

/// A station collapsed onto the route axis.
///
/// Transient: exists only for the duration of one planning call.
#[derive(Debug, Clone)]
pub struct ProjectedStation {
    pub station: Arc<Station>,
    /// Distance travelled along the route polyline from the origin to
    /// this station's nearest waypoint, in miles.
    pub distance_miles: f64,
}

/// Running haversine distance of each waypoint from the origin.
///
/// The output has the same length as `waypoints` and is monotonically
/// non-decreasing; the last element is the route length.
pub fn cumulative_distances(waypoints: &[Coord]) -> Vec<f64> {
    let mut out = Vec::with_capacity(waypoints.len());
    let mut total = 0.0;
    for (i, w) in waypoints.iter().enumerate() {
        if i > 0 {
            total += waypoints[i - 1].haversine_miles(w);
        }
        out.push(total);
    }
    out
}

/// Total polyline length in miles.
pub fn route_length_miles(waypoints: &[Coord]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| pair[0].haversine_miles(&pair[1]))
        .sum()
}

/// Project stations onto the route axis, ordered by cumulative distance.
///
/// Ties are broken by ascending price, then station id, giving a total
/// order: identical inputs always produce identical output.
///
/// # Errors
///
/// `PlanError::InvalidInput` when the route has fewer than 2 waypoints.
pub fn project(
    waypoints: &[Coord],
    stations: &[Arc<Station>],
) -> Result<Vec<ProjectedStation>, PlanError> {
    if waypoints.len() < 2 {
        return Err(PlanError::InvalidInput(
            "route must have at least 2 waypoints".to_string(),
        ));
    }

    let cumulative = cumulative_distances(waypoints);

    let mut projected: Vec<ProjectedStation> = stations
        .iter()
        .map(|station| {
            // Nearest waypoint by haversine. The corridor filter has
            // already bounded how far off-axis this approximation can be.
            let nearest = waypoints
                .iter()
                .enumerate()
                .map(|(i, w)| (i, station.position.haversine_miles(w)))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);

            ProjectedStation {
                station: station.clone(),
                distance_miles: cumulative[nearest],
            }
        })
        .collect();

    projected.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| {
                a.station
                    .price_per_gallon
                    .cmp(&b.station.price_per_gallon)
            })
            .then_with(|| a.station.id.cmp(&b.station.id))
    });

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MILES_PER_DEGREE_LAT, StationId};

    fn coord(lat: f64, lng: f64) -> Coord {
        Coord::new(lat, lng).unwrap()
    }

    fn station(id: u32, lat: f64, lng: f64, price: &str) -> Arc<Station> {
        Arc::new(Station {
            id: StationId(id),
            name: format!("Station {id}"),
            address: String::new(),
            city: String::new(),
            state: "NM".to_string(),
            rack_id: id,
            price_per_gallon: price.parse().unwrap(),
            position: coord(lat, lng),
        })
    }

    /// Waypoints one degree apart heading north: exact distances.
    fn route() -> Vec<Coord> {
        (0..5).map(|i| coord(30.0 + i as f64, -100.0)).collect()
    }

    #[test]
    fn requires_two_waypoints() {
        let err = project(&[coord(30.0, -100.0)], &[]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn cumulative_is_monotonic_and_exact_on_meridian() {
        let c = cumulative_distances(&route());
        assert_eq!(c.len(), 5);
        assert_eq!(c[0], 0.0);
        for (i, d) in c.iter().enumerate() {
            assert!((d - i as f64 * MILES_PER_DEGREE_LAT).abs() < 1e-6);
        }
        assert!((route_length_miles(&route()) - 4.0 * MILES_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn stations_snap_to_nearest_waypoint() {
        // Slightly north of the waypoint at 32.0 -> snaps to index 2.
        let s = station(1, 32.1, -100.0, "3.00");
        let projected = project(&route(), &[s]).unwrap();
        assert_eq!(projected.len(), 1);
        assert!((projected[0].distance_miles - 2.0 * MILES_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn output_sorted_by_distance() {
        let stations = vec![
            station(1, 33.0, -100.0, "3.00"),
            station(2, 31.0, -100.0, "3.00"),
            station(3, 34.0, -100.0, "3.00"),
        ];
        let projected = project(&route(), &stations).unwrap();
        let ids: Vec<u32> = projected.iter().map(|p| p.station.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn distance_ties_break_by_price_then_id() {
        // All three snap to the same waypoint.
        let stations = vec![
            station(9, 32.0, -100.01, "3.50"),
            station(4, 32.0, -100.02, "2.90"),
            station(2, 32.0, -99.99, "3.50"),
        ];
        let projected = project(&route(), &stations).unwrap();
        let ids: Vec<u32> = projected.iter().map(|p| p.station.id.0).collect();
        // Cheapest first, then lower id among equal prices.
        assert_eq!(ids, vec![4, 2, 9]);
    }

    #[test]
    fn empty_station_set() {
        let projected = project(&route(), &[]).unwrap();
        assert!(projected.is_empty());
    }

    #[test]
    fn projection_lies_within_route_bounds() {
        let stations = vec![
            station(1, 29.0, -100.0, "3.00"), // south of origin
            station(2, 40.0, -100.0, "3.00"), // north of destination
        ];
        let projected = project(&route(), &stations).unwrap();
        let total = route_length_miles(&route());
        for p in &projected {
            assert!(p.distance_miles >= 0.0);
            assert!(p.distance_miles <= total);
        }
        // Out-of-range stations clamp to the endpoints.
        assert_eq!(projected[0].distance_miles, 0.0);
        assert!((projected[1].distance_miles - total).abs() < 1e-9);
    }
}
