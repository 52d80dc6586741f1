//! Integration tests for the fleet facade and snapshot persistence.
//!
//! These tests exercise the whole aggregate through the public API:
//! gated mutations, snapshot save/load round trips, path routing, and
//! the documented stale-reference behavior.

use std::path::Path;

use serde_json::{json, Map, Value};

use fleetwork::core::catalog::{build_vehicle, VehicleCatalog};
use fleetwork::core::driver::{Address, Driver};
use fleetwork::core::types::{DriverId, Role, VehicleId};
use fleetwork::core::vehicle::{Truck, Vehicle};
use fleetwork::fleet::authz::Principal;
use fleetwork::fleet::store::StoreError;
use fleetwork::fleet::Fleet;

fn admin() -> Principal {
    Principal::new("alice", [Role::Admin])
}

fn vehicle(tag: &str, id: &str, model: &str, extras: &[(&str, Value)]) -> Box<dyn Vehicle> {
    let mut fields = Map::new();
    fields.insert("vehicle_id".into(), Value::from(id));
    fields.insert("model".into(), Value::from(model));
    fields.insert("year".into(), Value::from(2020));
    fields.insert("capacity".into(), Value::from(50));
    for (key, value) in extras {
        fields.insert((*key).to_string(), value.clone());
    }
    build_vehicle(VehicleCatalog::global(), tag, fields).unwrap()
}

fn seeded_fleet() -> Fleet {
    let mut fleet = Fleet::new("TransCo");
    let alice = admin();
    fleet
        .add_vehicle(
            &alice,
            vehicle("bus", "B-1", "LiAZ-5292", &[("route_number", Value::from("42"))]),
        )
        .unwrap();
    fleet
        .add_vehicle(
            &alice,
            vehicle(
                "truck",
                "T-1",
                "Volvo FH",
                &[("cargo_capacity_tons", Value::from(20.0))],
            ),
        )
        .unwrap();
    fleet
        .add_vehicle(
            &alice,
            vehicle("taxi", "TX-7", "Skoda Octavia", &[("license_plate", Value::from("ABC-777"))]),
        )
        .unwrap();

    fleet
        .add_driver(
            &alice,
            Driver::new(
                "Ivan Petrov",
                DriverId::new("D001").unwrap(),
                "D",
                Address::new("Kazan", "Lenina", "10"),
            ),
        )
        .unwrap();
    fleet
        .add_driver(
            &alice,
            Driver::new(
                "Pavel Sidorov",
                DriverId::new("D002").unwrap(),
                "C+E",
                Address::new("Kazan", "Kremlyovskaya", "1"),
            ),
        )
        .unwrap();
    fleet
        .assign_driver_to_vehicle(
            &alice,
            &DriverId::new("D001").unwrap(),
            &VehicleId::new("B-1").unwrap(),
        )
        .unwrap();
    fleet
}

#[test]
fn round_trip_preserves_counts_and_assignment() {
    let dir = tempfile::tempdir().unwrap();
    let fleet = seeded_fleet();
    fleet.save(dir.path(), None).unwrap();

    let restored = Fleet::load(VehicleCatalog::global(), dir.path(), None).unwrap();
    assert_eq!(restored.name(), "TransCo");
    assert_eq!(restored.vehicle_count(), 3);
    assert_eq!(restored.driver_count(), 2);

    // The assignment link survives the round trip.
    let ivan = restored.get_driver(&DriverId::new("D001").unwrap()).unwrap();
    assert_eq!(ivan.assigned_vehicle().unwrap().as_str(), "B-1");
    let pavel = restored.get_driver(&DriverId::new("D002").unwrap()).unwrap();
    assert_eq!(pavel.assigned_vehicle(), None);

    // Variant fields are preserved exactly.
    let truck = restored.vehicle(&VehicleId::new("T-1").unwrap()).unwrap();
    let truck = truck.as_any().downcast_ref::<Truck>().unwrap();
    assert_eq!(truck.cargo_capacity_tons(), 20.0);

    // Restored vehicles are equal to the originals.
    for original in fleet.vehicles() {
        let restored = restored.vehicle(original.base().id()).unwrap();
        assert_eq!(original, restored);
        assert_eq!(original.type_tag(), restored.type_tag());
    }
}

#[test]
fn load_against_missing_file_fails_with_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = Fleet::load(VehicleCatalog::global(), dir.path(), None);
    match result {
        Err(StoreError::NotFound { path }) => {
            assert!(path.starts_with(dir.path()));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn explicit_relative_path_lands_in_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let fleet = seeded_fleet();
    let written = fleet.save(dir.path(), Some(Path::new("backup.json"))).unwrap();
    assert_eq!(written, dir.path().join("backup.json"));
    assert!(written.exists());

    let restored =
        Fleet::load(VehicleCatalog::global(), dir.path(), Some(Path::new("backup.json"))).unwrap();
    assert_eq!(restored.vehicle_count(), 3);
}

#[test]
fn absolute_path_bypasses_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("elsewhere.json");
    let fleet = seeded_fleet();
    let written = fleet.save(Path::new("ignored-data-dir"), Some(&target)).unwrap();
    assert_eq!(written, target);
    assert!(target.exists());
}

#[test]
fn stale_assignment_is_kept_in_memory_but_saved_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let mut fleet = seeded_fleet();
    let b1 = VehicleId::new("B-1").unwrap();
    let d1 = DriverId::new("D001").unwrap();

    fleet.remove_vehicle(&admin(), &b1).unwrap();

    // In memory the dangling link survives; no cascade on removal.
    assert_eq!(fleet.get_driver(&d1).unwrap().assigned_vehicle(), Some(&b1));

    // The wire format embeds records, so the dangling link has no
    // representation and comes back as unassigned.
    fleet.save(dir.path(), None).unwrap();
    let restored = Fleet::load(VehicleCatalog::global(), dir.path(), None).unwrap();
    assert_eq!(restored.get_driver(&d1).unwrap().assigned_vehicle(), None);
    assert_eq!(restored.vehicle_count(), 2);
}

#[test]
fn snapshot_with_unregistered_type_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let doc = json!({
        "name": "TransCo",
        "vehicles": [{
            "type": "spaceship",
            "vehicle_id": "S-1",
            "model": "Enterprise",
            "year": 2020,
            "capacity": 400,
            "status": "idle",
        }],
        "drivers": [],
    });
    let path = dir.path().join("transport_company.json");
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    let result = Fleet::load(VehicleCatalog::global(), dir.path(), None);
    match result {
        Err(StoreError::Vehicle(e)) => {
            assert!(e.to_string().contains("unknown vehicle type"));
            assert!(e.to_string().contains("spaceship"));
        }
        other => panic!("expected vehicle error, got {:?}", other),
    }
}

#[test]
fn snapshot_file_matches_documented_format() {
    let dir = tempfile::tempdir().unwrap();
    let fleet = seeded_fleet();
    let path = fleet.save(dir.path(), None).unwrap();

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(doc["name"], "TransCo");
    assert_eq!(doc["vehicles"].as_array().unwrap().len(), 3);

    let bus = &doc["vehicles"][0];
    assert_eq!(bus["type"], "bus");
    assert_eq!(bus["vehicle_id"], "B-1");
    assert_eq!(bus["status"], "idle");
    assert_eq!(bus["route_number"], "42");

    let ivan = &doc["drivers"][0];
    assert_eq!(ivan["driver_id"], "D001");
    assert_eq!(ivan["address"]["city"], "Kazan");
    // The assigned vehicle is embedded as a full record.
    assert_eq!(ivan["assigned_vehicle"]["vehicle_id"], "B-1");
    assert_eq!(doc["drivers"][1]["assigned_vehicle"], Value::Null);
}

#[test]
fn save_creates_the_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data");
    let fleet = Fleet::new("TransCo");
    let written = fleet.save(&nested, None).unwrap();
    assert!(written.exists());
    assert!(nested.is_dir());
}

#[test]
fn loaded_fleet_accepts_further_gated_operations() {
    let dir = tempfile::tempdir().unwrap();
    seeded_fleet().save(dir.path(), None).unwrap();

    let mut restored = Fleet::load(VehicleCatalog::global(), dir.path(), None).unwrap();
    restored
        .add_vehicle(
            &admin(),
            vehicle("bus", "B-2", "MAZ-203", &[("route_number", Value::from("7"))]),
        )
        .unwrap();
    assert_eq!(restored.vehicle_count(), 4);

    // Duplicate ids from the snapshot are still rejected.
    let err = restored
        .add_vehicle(
            &admin(),
            vehicle("bus", "B-1", "MAZ-203", &[("route_number", Value::from("7"))]),
        )
        .unwrap_err();
    assert!(err.to_string().contains("duplicate vehicle id"));
}
