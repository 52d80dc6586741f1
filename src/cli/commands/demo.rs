//! cli::commands::demo
//!
//! Seed a demo fleet and walk through every subsystem: factory and
//! catalog, gated facade operations, search and statistics, both cost
//! paths, tracking and reporting, the approval chain, snapshot round
//! trip, and the error taxonomy.

use anyhow::Result;
use serde_json::{Map, Value};

use super::{vehicles, Context};
use crate::core::catalog::{build_vehicle, VehicleCatalog};
use crate::core::driver::{Address, Driver};
use crate::core::types::{DriverId, Role, VehicleId};
use crate::core::vehicle::{Bus, Trackable, Vehicle};
use crate::fleet::authz::Principal;
use crate::fleet::costing::{BusCostCalculator, CostCalculator, TruckCostCalculator};
use crate::fleet::log::FileActionLog;
use crate::fleet::maintenance::{ApprovalChain, MaintenanceRequest};
use crate::fleet::Fleet;
use crate::ui::output;

/// Handle the `demo` command.
pub fn demo(ctx: &Context) -> Result<()> {
    let v = ctx.verbosity;
    let admin = Principal::new("alice", [Role::Admin]);
    let dispatcher = Principal::new("bob", [Role::Dispatcher]);

    let mut fleet = Fleet::new(&ctx.company);
    fleet.set_action_log(Box::new(FileActionLog::new(&ctx.action_log)));

    let b1 = VehicleId::new("B-1")?;
    let t1 = VehicleId::new("T-1")?;
    let tx7 = VehicleId::new("TX-7")?;

    fleet.add_vehicle(
        &admin,
        vehicle("bus", "B-1", "LiAZ-5292", 2020, 110, &[("route_number", Value::from("42"))])?,
    )?;
    fleet.add_vehicle(
        &dispatcher,
        vehicle(
            "truck",
            "T-1",
            "Volvo FH",
            2018,
            2,
            &[("cargo_capacity_tons", Value::from(20.0))],
        )?,
    )?;
    fleet.add_vehicle(
        &admin,
        vehicle(
            "taxi",
            "TX-7",
            "Skoda Octavia",
            2022,
            4,
            &[("license_plate", Value::from("ABC-777"))],
        )?,
    )?;

    let d1 = DriverId::new("D001")?;
    fleet.add_driver(
        &dispatcher,
        Driver::new("Ivan Petrov", d1.clone(), "D", Address::new("Kazan", "Lenina", "10")),
    )?;
    fleet.add_driver(
        &admin,
        Driver::new(
            "Pavel Sidorov",
            DriverId::new("D002")?,
            "C+E",
            Address::new("Kazan", "Kremlyovskaya", "1"),
        ),
    )?;
    fleet.assign_driver_to_vehicle(&dispatcher, &d1, &b1)?;

    output::print("=== search and statistics ===", v);
    let found = fleet.search_by_model("volvo");
    output::print(format!("found {} vehicle(s) matching 'volvo'", found.len()), v);
    for vehicle in found {
        output::print(format!("  {}", vehicle.describe()), v);
    }
    for (tag, capacity) in fleet.stats_capacity_by_type() {
        output::print(format!("  {}: total capacity {}", tag, capacity), v);
    }

    output::print("=== cost calculators vs own formulas ===", v);
    if let Some(bus) = fleet.vehicle(&b1) {
        output::print(
            format!(
                "bus over 25 km: calculator {:.2}, own formula {:.2}",
                BusCostCalculator.calculate(bus, 25.0),
                bus.operating_cost(25.0)
            ),
            v,
        );
    }
    if let Some(truck) = fleet.vehicle(&t1) {
        output::print(
            format!(
                "truck over 200 km: calculator {:.2}, own formula {:.2}",
                TruckCostCalculator.calculate(truck, 200.0),
                truck.operating_cost(200.0)
            ),
            v,
        );
    }
    if let Some(taxi) = fleet.vehicle(&tx7) {
        output::print(
            format!("taxi over 12.5 km: own formula {:.2}", taxi.operating_cost(12.5)),
            v,
        );
    }

    output::print("=== tracking and reporting ===", v);
    if let Some(bus) = fleet.vehicle_mut(&b1) {
        bus.base_mut().update_location("N55.79 E49.11");
        if let Some(bus) = bus.as_any().downcast_ref::<Bus>() {
            output::print(bus.track_location(), v);
        }
    }
    if let Some(taxi) = fleet.vehicle_mut(&tx7) {
        taxi.base_mut().update_location("N55.79 E49.12");
    }
    if let Some(taxi) = fleet.vehicle(&tx7) {
        if let Some(report) = vehicles::trip_report_line(taxi) {
            output::print(report, v);
        }
    }

    output::print("=== maintenance approval chain ===", v);
    let chain = ApprovalChain::standard();
    let requests = [
        MaintenanceRequest::new(b1.clone(), 300.0, "replace cabin lamps"),
        MaintenanceRequest::new(t1.clone(), 1500.0, "replace brake pads"),
        MaintenanceRequest::new(tx7.clone(), 10000.0, "engine overhaul"),
    ];
    for request in &requests {
        output::print(chain.handle(request), v);
    }

    output::print("=== snapshot round trip ===", v);
    let path = fleet.save(&ctx.data_dir, ctx.snapshot.as_deref())?;
    output::print(format!("saved to {}", path.display()), v);
    let restored = Fleet::load(VehicleCatalog::global(), &ctx.data_dir, ctx.snapshot.as_deref())?;
    output::print(
        format!(
            "restored '{}': {} vehicle(s), {} driver(s)",
            restored.name(),
            restored.vehicle_count(),
            restored.driver_count()
        ),
        v,
    );

    output::print("=== expected errors ===", v);
    if let Err(e) = fleet.remove_vehicle(&dispatcher, &b1) {
        output::print(format!("dispatcher removing a vehicle: {}", e), v);
    }
    if let Err(e) = fleet.assign_driver_to_vehicle(&admin, &DriverId::new("NO_SUCH")?, &b1) {
        output::print(format!("assigning an unknown driver: {}", e), v);
    }
    if let Err(e) = vehicle("bus", "BAD", "OldTimer", 1800, 10, &[("route_number", Value::from("0"))])
    {
        output::print(format!("building a vehicle from 1800: {}", e), v);
    }
    if let Err(e) = vehicle("spaceship", "S-1", "Enterprise", 2020, 400, &[]) {
        output::print(format!("building an unregistered type: {}", e), v);
    }

    Ok(())
}

fn vehicle(
    tag: &str,
    id: &str,
    model: &str,
    year: i32,
    capacity: u32,
    extras: &[(&str, Value)],
) -> Result<Box<dyn Vehicle>, crate::core::vehicle::VehicleError> {
    let mut fields = Map::new();
    fields.insert("vehicle_id".into(), Value::from(id));
    fields.insert("model".into(), Value::from(model));
    fields.insert("year".into(), Value::from(year));
    fields.insert("capacity".into(), Value::from(capacity));
    for (key, value) in extras {
        fields.insert((*key).to_string(), value.clone());
    }
    build_vehicle(VehicleCatalog::global(), tag, fields)
}
