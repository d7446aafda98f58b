//! Vehicle fuel profile.

use serde::{Deserialize, Serialize};

use super::PlanError;

/// Tank capacity and fuel economy of the vehicle being routed.
///
/// The product of the two fields is the maximum distance the vehicle can
/// travel on a full tank, which is the hard constraint the optimizer
/// plans around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Usable tank capacity in gallons.
    pub tank_capacity_gal: f64,
    /// Fuel economy in miles per gallon.
    pub mpg: f64,
}

impl VehicleProfile {
    /// Construct a profile, rejecting non-positive or non-finite values.
    pub fn new(tank_capacity_gal: f64, mpg: f64) -> Result<Self, PlanError> {
        let profile = Self {
            tank_capacity_gal,
            mpg,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the profile invariants.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.tank_capacity_gal.is_finite() || self.tank_capacity_gal <= 0.0 {
            return Err(PlanError::InvalidInput(
                "tank capacity must be a positive number of gallons".to_string(),
            ));
        }
        if !self.mpg.is_finite() || self.mpg <= 0.0 {
            return Err(PlanError::InvalidInput(
                "fuel economy must be a positive miles-per-gallon value".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum distance in miles on a full tank.
    pub fn max_range_miles(&self) -> f64 {
        self.tank_capacity_gal * self.mpg
    }
}

impl Default for VehicleProfile {
    /// A typical heavy truck: 500-mile range at 10 mpg.
    fn default() -> Self {
        Self {
            tank_capacity_gal: 50.0,
            mpg: 10.0,
        }
    }
}
