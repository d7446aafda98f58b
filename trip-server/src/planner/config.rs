//! Planning configuration.

use crate::domain::VehicleProfile;

/// Default lateral corridor half-width in miles.
const DEFAULT_MAX_LATERAL_MILES: f64 = 10.0;

/// Configuration parameters for fuel-stop planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum lateral deviation from the route polyline (miles).
    /// Stations further off-axis than this are never considered.
    pub max_lateral_miles: f64,

    /// Vehicle assumed when a request does not supply its own.
    pub default_vehicle: VehicleProfile,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_lateral_miles: f64, default_vehicle: VehicleProfile) -> Self {
        Self {
            max_lateral_miles,
            default_vehicle,
        }
    }

    /// Set the corridor half-width.
    pub fn with_max_lateral_miles(mut self, miles: f64) -> Self {
        self.max_lateral_miles = miles;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_lateral_miles: DEFAULT_MAX_LATERAL_MILES,
            default_vehicle: VehicleProfile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.max_lateral_miles, 10.0);
        assert_eq!(config.default_vehicle.tank_capacity_gal, 50.0);
        assert_eq!(config.default_vehicle.mpg, 10.0);
    }

    #[test]
    fn builder() {
        let config = PlannerConfig::default().with_max_lateral_miles(25.0);
        assert_eq!(config.max_lateral_miles, 25.0);
    }
}
