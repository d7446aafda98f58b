//! Planner error taxonomy.
//!
//! The core returns either a fully valid stop plan or one of these errors;
//! it never degrades to a partial result. Provider and storage failures are
//! separate types owned by their own layers.

/// Errors produced by the fuel-stop planning core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Malformed inputs: fewer than 2 waypoints, non-positive tank
    /// capacity or mpg, out-of-order projections, and the like.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A gap between consecutive mandatory points (origin, reachable
    /// stations, destination) exceeds the vehicle's maximum range, so no
    /// refuelling schedule can cover the route.
    #[error(
        "route is infeasible: no fuel stop between mile {gap_start:.1} and mile {gap_end:.1} \
         ({:.1} miles apart, maximum range {max_range:.1} miles)",
        .gap_end - .gap_start
    )]
    Infeasible {
        /// Cumulative distance of the last reachable fuel event.
        gap_start: f64,
        /// Cumulative distance of the first unreachable point.
        gap_end: f64,
        /// The vehicle's full-tank range in miles.
        max_range: f64,
    },
}
