//! Corridor filter: which stations are usable without a meaningful detour.
//!
//! Buckets route waypoints into a coarse spatial grid so each station only
//! compares itself against nearby waypoints instead of the whole polyline.
//! Near O(waypoints + stations) instead of the full cross product.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{Coord, MILES_PER_DEGREE_LAT, PlanError, Station};

/// Grid cell key: (latitude band, longitude band).
type Cell = (i32, i32);

/// Spatial grid over route waypoints.
struct WaypointGrid {
    cells: HashMap<Cell, Vec<usize>>,
    cell_lat_deg: f64,
    cell_lng_deg: f64,
}

impl WaypointGrid {
    fn build(waypoints: &[Coord], max_lateral_miles: f64) -> Self {
        // Cells must be at least the corridor radius wide so a 3x3
        // neighbourhood is guaranteed to cover it. Longitude degrees
        // shrink with latitude, so size longitude cells for the widest
        // latitude the corridor can touch.
        let cell_lat_deg = max_lateral_miles / MILES_PER_DEGREE_LAT;
        let widest_lat = waypoints
            .iter()
            .map(|w| w.lat().abs())
            .fold(0.0f64, f64::max)
            + cell_lat_deg;
        let cos_ref = widest_lat.min(89.0).to_radians().cos().max(0.02);
        let cell_lng_deg = cell_lat_deg / cos_ref;

        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (idx, w) in waypoints.iter().enumerate() {
            let key = (
                (w.lat() / cell_lat_deg).floor() as i32,
                (w.lng() / cell_lng_deg).floor() as i32,
            );
            cells.entry(key).or_default().push(idx);
        }

        Self {
            cells,
            cell_lat_deg,
            cell_lng_deg,
        }
    }

    /// Waypoint indices in the station's cell and its 8 neighbours.
    fn candidates_near(&self, position: &Coord) -> impl Iterator<Item = usize> + '_ {
        let lat_cell = (position.lat() / self.cell_lat_deg).floor() as i32;
        let lng_cell = (position.lng() / self.cell_lng_deg).floor() as i32;

        (-1..=1).flat_map(move |dlat| {
            (-1..=1).flat_map(move |dlng| {
                self.cells
                    .get(&(lat_cell + dlat, lng_cell + dlng))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }
}

/// Filter `stations` down to those within `max_lateral_miles` of some
/// route waypoint.
///
/// Returns stations in their input order, deduplicated by id. Pure
/// function of its inputs.
///
/// # Errors
///
/// `PlanError::InvalidInput` when the route has fewer than 2 waypoints or
/// the corridor tolerance is not a positive finite number.
pub fn stations_near_route(
    waypoints: &[Coord],
    stations: &[Arc<Station>],
    max_lateral_miles: f64,
) -> Result<Vec<Arc<Station>>, PlanError> {
    if waypoints.len() < 2 {
        return Err(PlanError::InvalidInput(
            "route must have at least 2 waypoints".to_string(),
        ));
    }
    if !max_lateral_miles.is_finite() || max_lateral_miles <= 0.0 {
        return Err(PlanError::InvalidInput(
            "corridor tolerance must be a positive number of miles".to_string(),
        ));
    }

    let grid = WaypointGrid::build(waypoints, max_lateral_miles);

    let mut seen: HashSet<crate::domain::StationId> = HashSet::new();
    let mut kept = Vec::new();

    for station in stations {
        if seen.contains(&station.id) {
            continue;
        }

        let within = grid
            .candidates_near(&station.position)
            .any(|idx| station.position.haversine_miles(&waypoints[idx]) <= max_lateral_miles);

        if within {
            seen.insert(station.id);
            kept.push(station.clone());
        }
    }

    Ok(kept)
}
