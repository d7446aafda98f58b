//! Stop plan result types.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::Station;

/// A single refuelling event in a plan.
#[derive(Debug, Clone)]
pub struct FuelStop {
    pub station: Arc<Station>,
    /// Cumulative route distance of the stop, in miles.
    pub distance_miles: f64,
    /// Gallons purchased at this stop. Always positive.
    pub gallons: f64,
    /// Un-rounded cost of this purchase.
    pub cost: Decimal,
}

/// The selected refuelling schedule for one route.
///
/// Immutable result of a single optimization call. Stops appear in route
/// order and only include stations with a non-zero purchase.
#[derive(Debug, Clone)]
pub struct StopPlan {
    pub stops: Vec<FuelStop>,
    /// Total fuel expenditure, rounded to cents.
    pub total_cost: Decimal,
}

impl StopPlan {
    /// Total gallons purchased across all stops.
    pub fn total_gallons(&self) -> f64 {
        self.stops.iter().map(|s| s.gallons).sum()
    }
}
