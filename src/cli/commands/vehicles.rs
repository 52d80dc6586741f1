//! cli::commands::vehicles
//!
//! Vehicle management commands.

use anyhow::Result;
use serde_json::{Map, Value};

use super::Context;
use crate::cli::args::VehicleCommand;
use crate::core::catalog::{build_vehicle, VehicleCatalog};
use crate::core::types::VehicleId;
use crate::core::vehicle::{Bus, Taxi, Trackable, Vehicle};
use crate::fleet::FleetError;
use crate::ui::output;

/// Handle a vehicle subcommand.
pub fn run(ctx: &Context, command: VehicleCommand) -> Result<()> {
    match command {
        VehicleCommand::Add {
            vehicle_type,
            id,
            model,
            year,
            capacity,
            route,
            cargo_tons,
            plate,
            status,
        } => add(
            ctx,
            &vehicle_type,
            &id,
            &model,
            year,
            capacity,
            route,
            cargo_tons,
            plate,
            status,
        ),
        VehicleCommand::List => list(ctx),
        VehicleCommand::Search { query } => search(ctx, &query),
        VehicleCommand::Stats => stats(ctx),
        VehicleCommand::Remove { id } => remove(ctx, &id),
        VehicleCommand::Locate { id, location } => locate(ctx, &id, &location),
    }
}

#[allow(clippy::too_many_arguments)]
fn add(
    ctx: &Context,
    vehicle_type: &str,
    id: &str,
    model: &str,
    year: i32,
    capacity: u32,
    route: Option<String>,
    cargo_tons: Option<f64>,
    plate: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let mut fields = Map::new();
    fields.insert("vehicle_id".into(), Value::from(id));
    fields.insert("model".into(), Value::from(model));
    fields.insert("year".into(), Value::from(year));
    fields.insert("capacity".into(), Value::from(capacity));
    if let Some(route) = route {
        fields.insert("route_number".into(), Value::from(route));
    }
    if let Some(tons) = cargo_tons {
        fields.insert("cargo_capacity_tons".into(), Value::from(tons));
    }
    if let Some(plate) = plate {
        fields.insert("license_plate".into(), Value::from(plate));
    }
    if let Some(status) = status {
        fields.insert("status".into(), Value::from(status));
    }

    let vehicle = build_vehicle(VehicleCatalog::global(), vehicle_type, fields)?;
    let description = vehicle.describe();

    let mut fleet = ctx.load_fleet()?;
    fleet.add_vehicle(&ctx.principal, vehicle)?;
    ctx.save_fleet(&fleet)?;

    output::print(format!("added {}", description), ctx.verbosity);
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let fleet = ctx.load_fleet()?;
    if fleet.vehicle_count() == 0 {
        output::print("no vehicles", ctx.verbosity);
        return Ok(());
    }
    for vehicle in fleet.vehicles() {
        output::print(format_line(vehicle), ctx.verbosity);
    }
    Ok(())
}

fn search(ctx: &Context, query: &str) -> Result<()> {
    let fleet = ctx.load_fleet()?;
    let found = fleet.search_by_model(query);
    output::print(
        format!("found {} vehicle(s) matching '{}'", found.len(), query),
        ctx.verbosity,
    );
    for vehicle in found {
        output::print(format_line(vehicle), ctx.verbosity);
    }
    Ok(())
}

fn stats(ctx: &Context) -> Result<()> {
    let fleet = ctx.load_fleet()?;
    let stats = fleet.stats_capacity_by_type();
    if stats.is_empty() {
        output::print("no vehicles", ctx.verbosity);
        return Ok(());
    }
    output::print("total capacity by type:", ctx.verbosity);
    for (tag, capacity) in stats {
        output::print(format!("  {}: {}", tag, capacity), ctx.verbosity);
    }
    Ok(())
}

fn remove(ctx: &Context, id: &str) -> Result<()> {
    let id = VehicleId::new(id)?;
    let mut fleet = ctx.load_fleet()?;
    fleet.remove_vehicle(&ctx.principal, &id)?;
    ctx.save_fleet(&fleet)?;
    output::print(
        format!("vehicle {} no longer in the fleet", id),
        ctx.verbosity,
    );
    Ok(())
}

fn locate(ctx: &Context, id: &str, location: &str) -> Result<()> {
    let id = VehicleId::new(id)?;
    let mut fleet = ctx.load_fleet()?;
    let vehicle = fleet
        .vehicle_mut(&id)
        .ok_or(FleetError::VehicleNotFound(id.clone()))?;
    vehicle.base_mut().update_location(location);

    // Trackable vehicles can render their position right away.
    if let Some(bus) = vehicle.as_any().downcast_ref::<Bus>() {
        output::print(bus.track_location(), ctx.verbosity);
    } else {
        output::print(format!("vehicle {} located at {}", id, location), ctx.verbosity);
    }

    ctx.save_fleet(&fleet)?;
    Ok(())
}

fn format_line(vehicle: &dyn Vehicle) -> String {
    let base = vehicle.base();
    format!(
        "{}  {} [{}]",
        base.id(),
        vehicle.describe(),
        base.status()
    )
}

/// Render the taxi's trip report if the vehicle is one.
///
/// Used by the demo walk-through; kept here with the other vehicle
/// rendering helpers.
pub(crate) fn trip_report_line(vehicle: &dyn Vehicle) -> Option<String> {
    use crate::core::vehicle::Reportable;
    vehicle
        .as_any()
        .downcast_ref::<Taxi>()
        .map(|taxi| taxi.trip_report())
}
