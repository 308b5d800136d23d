//! Planning parameters.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Minimum customer demand (kg).
pub const DEFAULT_MIN_DEMAND_KG: f64 = 200.0;

/// Standard vehicle capacity (kg).
pub const DEFAULT_VEHICLE_CAPACITY_KG: f64 = 22000.0;

/// Vehicles dispatched per depot, whatever the depot declares.
pub const VEHICLES_PER_DEPOT: usize = 1;

/// Parameters for route construction.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::RoutingConfig;
///
/// let config = RoutingConfig::default();
/// assert_eq!(config.min_demand_kg, 200.0);
/// assert_eq!(config.vehicle_capacity_kg, 22000.0);
///
/// let small = RoutingConfig::default().with_vehicle_capacity(5000.0);
/// assert!(small.validate().is_ok());
/// assert!(RoutingConfig::default().with_vehicle_capacity(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Demand floor applied to every customer before planning.
    pub min_demand_kg: f64,
    /// Capacity of the single vehicle dispatched per depot.
    pub vehicle_capacity_kg: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            min_demand_kg: DEFAULT_MIN_DEMAND_KG,
            vehicle_capacity_kg: DEFAULT_VEHICLE_CAPACITY_KG,
        }
    }
}

impl RoutingConfig {
    /// Sets the vehicle capacity.
    pub fn with_vehicle_capacity(mut self, kg: f64) -> Self {
        self.vehicle_capacity_kg = kg;
        self
    }

    /// Sets the minimum customer demand.
    pub fn with_min_demand(mut self, kg: f64) -> Self {
        self.min_demand_kg = kg;
        self
    }

    /// Checks that capacity is positive and the demand floor non-negative.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if !self.vehicle_capacity_kg.is_finite() || self.vehicle_capacity_kg <= 0.0 {
            return Err(RoutingError::InvalidConfig(format!(
                "vehicle capacity must be positive, got {}",
                self.vehicle_capacity_kg
            )));
        }
        if !self.min_demand_kg.is_finite() || self.min_demand_kg < 0.0 {
            return Err(RoutingError::InvalidConfig(format!(
                "minimum demand must be non-negative, got {}",
                self.min_demand_kg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RoutingConfig::default();
        assert_eq!(c.min_demand_kg, DEFAULT_MIN_DEMAND_KG);
        assert_eq!(c.vehicle_capacity_kg, DEFAULT_VEHICLE_CAPACITY_KG);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = RoutingConfig::default()
            .with_vehicle_capacity(1000.0)
            .with_min_demand(50.0);
        assert_eq!(c.vehicle_capacity_kg, 1000.0);
        assert_eq!(c.min_demand_kg, 50.0);
    }

    #[test]
    fn test_invalid() {
        assert!(RoutingConfig::default().with_vehicle_capacity(-1.0).validate().is_err());
        assert!(RoutingConfig::default().with_vehicle_capacity(f64::NAN).validate().is_err());
        assert!(RoutingConfig::default().with_min_demand(-5.0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let c: RoutingConfig = serde_json::from_str(r#"{"vehicleCapacityKg": 8000}"#).expect("valid");
        assert_eq!(c.vehicle_capacity_kg, 8000.0);
        assert_eq!(c.min_demand_kg, DEFAULT_MIN_DEMAND_KG);
    }
}
