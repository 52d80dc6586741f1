//! fleet::costing
//!
//! Pluggable trip-cost calculators.
//!
//! # Design
//!
//! [`CostCalculator::calculate`] is a fixed skeleton:
//! `round2(base_cost + extra_cost)`. Implementations supply `base_cost`;
//! `extra_cost` defaults to zero. This is a strategy layered *next to*
//! the vehicles' own [`operating_cost`](crate::core::vehicle::Vehicle::operating_cost)
//! — the two use different constants and are kept as separate code paths
//! on purpose, so callers can price a trip without touching the entity's
//! own formula.

use crate::core::vehicle::{round2, Truck, Vehicle};

/// Two-step cost computation over a vehicle and a distance.
pub trait CostCalculator {
    /// The distance-driven component.
    fn base_cost(&self, vehicle: &dyn Vehicle, distance_km: f64) -> f64;

    /// The vehicle-driven surcharge. Defaults to zero.
    fn extra_cost(&self, _vehicle: &dyn Vehicle, _distance_km: f64) -> f64 {
        0.0
    }

    /// Fixed algorithm: base plus extra, rounded to cents.
    fn calculate(&self, vehicle: &dyn Vehicle, distance_km: f64) -> f64 {
        round2(self.base_cost(vehicle, distance_km) + self.extra_cost(vehicle, distance_km))
    }
}

/// Prices bus trips: per-kilometer base plus a capacity surcharge.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusCostCalculator;

impl CostCalculator for BusCostCalculator {
    fn base_cost(&self, _vehicle: &dyn Vehicle, distance_km: f64) -> f64 {
        1.0 * distance_km
    }

    fn extra_cost(&self, vehicle: &dyn Vehicle, _distance_km: f64) -> f64 {
        0.05 * f64::from(vehicle.base().capacity())
    }
}

/// Prices truck trips: per-kilometer base plus a tonnage surcharge.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruckCostCalculator;

impl CostCalculator for TruckCostCalculator {
    fn base_cost(&self, _vehicle: &dyn Vehicle, distance_km: f64) -> f64 {
        1.6 * distance_km
    }

    /// The surcharge reads the cargo rating via downcast; any other
    /// variant passed in prices at zero surcharge rather than erroring.
    fn extra_cost(&self, vehicle: &dyn Vehicle, _distance_km: f64) -> f64 {
        let tons = vehicle
            .as_any()
            .downcast_ref::<Truck>()
            .map_or(0.0, Truck::cargo_capacity_tons);
        8.0 * tons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VehicleId;
    use crate::core::vehicle::{Bus, Taxi, VehicleBase};

    fn bus(capacity: u32) -> Bus {
        let base =
            VehicleBase::new(VehicleId::new("B-1").unwrap(), "LiAZ-5292", 2020, capacity).unwrap();
        Bus::new(base, "42").unwrap()
    }

    fn truck(tons: f64) -> Truck {
        let base = VehicleBase::new(VehicleId::new("T-1").unwrap(), "Volvo FH", 2018, 2).unwrap();
        Truck::new(base, tons).unwrap()
    }

    #[test]
    fn bus_calculator_adds_capacity_surcharge() {
        // base 1.0 * 25 = 25, extra 0.05 * 110 = 5.5
        assert_eq!(BusCostCalculator.calculate(&bus(110), 25.0), 30.5);
    }

    #[test]
    fn truck_calculator_adds_tonnage_surcharge() {
        // base 1.6 * 200 = 320, extra 8.0 * 20 = 160
        assert_eq!(TruckCostCalculator.calculate(&truck(20.0), 200.0), 480.0);
    }

    #[test]
    fn truck_calculator_on_non_truck_has_zero_surcharge() {
        let base = VehicleBase::new(VehicleId::new("TX-7").unwrap(), "Skoda", 2022, 4).unwrap();
        let taxi = Taxi::new(base, "ABC-777").unwrap();
        // Only the per-kilometer base remains.
        assert_eq!(TruckCostCalculator.calculate(&taxi, 100.0), 160.0);
    }

    #[test]
    fn calculator_diverges_from_intrinsic_cost() {
        let bus = bus(110);
        let strategy = BusCostCalculator.calculate(&bus, 25.0);
        let intrinsic = bus.operating_cost(25.0);
        // Different constants: 30.5 vs 35.5. Both paths are kept.
        assert_eq!(strategy, 30.5);
        assert_eq!(intrinsic, 35.5);
        assert_ne!(strategy, intrinsic);
    }

    #[test]
    fn default_extra_cost_is_zero() {
        struct FlatRate;
        impl CostCalculator for FlatRate {
            fn base_cost(&self, _vehicle: &dyn Vehicle, distance_km: f64) -> f64 {
                0.5 * distance_km
            }
        }
        assert_eq!(FlatRate.calculate(&bus(110), 10.0), 5.0);
    }
}
