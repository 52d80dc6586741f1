//! cli::commands::maintenance
//!
//! Run a maintenance request through the approval chain.

use anyhow::Result;

use super::Context;
use crate::core::types::VehicleId;
use crate::fleet::maintenance::{ApprovalChain, MaintenanceRequest};
use crate::fleet::FleetError;
use crate::ui::output;

/// Handle the `maintain` command.
///
/// The chain itself is pure; nothing is persisted.
pub fn maintain(ctx: &Context, vehicle_id: &str, cost: f64, description: &str) -> Result<()> {
    let vehicle_id = VehicleId::new(vehicle_id)?;

    let fleet = ctx.load_fleet()?;
    if fleet.vehicle(&vehicle_id).is_none() {
        return Err(FleetError::VehicleNotFound(vehicle_id).into());
    }

    let request = MaintenanceRequest::new(vehicle_id, cost, description);
    let outcome = ApprovalChain::standard().handle(&request);
    output::print(outcome, ctx.verbosity);
    Ok(())
}
