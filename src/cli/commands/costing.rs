//! cli::commands::costing
//!
//! Price a trip with both cost paths: the vehicle's own formula and the
//! pluggable calculator for its kind, where one exists.

use anyhow::Result;

use super::Context;
use crate::core::types::VehicleId;
use crate::core::vehicle::{Bus, Truck, Vehicle};
use crate::fleet::costing::{BusCostCalculator, CostCalculator, TruckCostCalculator};
use crate::fleet::FleetError;
use crate::ui::output;

/// Handle the `cost` command.
pub fn cost(ctx: &Context, vehicle_id: &str, distance_km: f64) -> Result<()> {
    let vehicle_id = VehicleId::new(vehicle_id)?;

    let fleet = ctx.load_fleet()?;
    let vehicle = fleet
        .vehicle(&vehicle_id)
        .ok_or(FleetError::VehicleNotFound(vehicle_id))?;

    output::print(
        format!(
            "{} over {} km: own formula {:.2}",
            vehicle.describe(),
            distance_km,
            vehicle.operating_cost(distance_km)
        ),
        ctx.verbosity,
    );

    // The pluggable calculators use different constants on purpose.
    if vehicle.as_any().is::<Bus>() {
        output::print(
            format!(
                "bus calculator: {:.2}",
                BusCostCalculator.calculate(vehicle, distance_km)
            ),
            ctx.verbosity,
        );
    } else if vehicle.as_any().is::<Truck>() {
        output::print(
            format!(
                "truck calculator: {:.2}",
                TruckCostCalculator.calculate(vehicle, distance_km)
            ),
            ctx.verbosity,
        );
    }
    Ok(())
}
