//! cli::commands::drivers
//!
//! Driver management commands.

use anyhow::Result;

use super::Context;
use crate::cli::args::DriverCommand;
use crate::core::driver::{Address, Driver};
use crate::core::types::{DriverId, VehicleId};
use crate::ui::output;

/// Handle a driver subcommand.
pub fn run(ctx: &Context, command: DriverCommand) -> Result<()> {
    match command {
        DriverCommand::Add {
            id,
            name,
            license,
            city,
            street,
            house,
        } => add(ctx, &id, &name, &license, Address::new(city, street, house)),
        DriverCommand::List => list(ctx),
        DriverCommand::Assign {
            driver_id,
            vehicle_id,
        } => assign(ctx, &driver_id, &vehicle_id),
        DriverCommand::Remove { id } => remove(ctx, &id),
    }
}

fn add(ctx: &Context, id: &str, name: &str, license: &str, address: Address) -> Result<()> {
    let driver = Driver::new(name, DriverId::new(id)?, license, address);
    let line = driver.to_string();

    let mut fleet = ctx.load_fleet()?;
    fleet.add_driver(&ctx.principal, driver)?;
    ctx.save_fleet(&fleet)?;

    output::print(format!("hired {}", line), ctx.verbosity);
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let fleet = ctx.load_fleet()?;
    if fleet.driver_count() == 0 {
        output::print("no drivers", ctx.verbosity);
        return Ok(());
    }
    for driver in fleet.drivers() {
        let assignment = match driver.assigned_vehicle() {
            Some(id) => format!("assigned to {}", id),
            None => "unassigned".to_string(),
        };
        output::print(format!("{} - {}", driver, assignment), ctx.verbosity);
    }
    Ok(())
}

fn assign(ctx: &Context, driver_id: &str, vehicle_id: &str) -> Result<()> {
    let driver_id = DriverId::new(driver_id)?;
    let vehicle_id = VehicleId::new(vehicle_id)?;

    let mut fleet = ctx.load_fleet()?;
    fleet.assign_driver_to_vehicle(&ctx.principal, &driver_id, &vehicle_id)?;
    ctx.save_fleet(&fleet)?;

    output::print(
        format!("driver {} assigned to {}", driver_id, vehicle_id),
        ctx.verbosity,
    );
    Ok(())
}

fn remove(ctx: &Context, id: &str) -> Result<()> {
    let id = DriverId::new(id)?;
    let mut fleet = ctx.load_fleet()?;
    fleet.remove_driver(&ctx.principal, &id)?;
    ctx.save_fleet(&fleet)?;
    output::print(format!("driver {} no longer employed", id), ctx.verbosity);
    Ok(())
}
