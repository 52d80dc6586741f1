//! Property-based tests for the vehicle model and record format.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated inputs: the encode/decode round-trip law, and rejection of
//! out-of-range years and capacities.

use proptest::prelude::*;
use serde_json::{Map, Value};

use fleetwork::core::catalog::VehicleCatalog;
use fleetwork::core::types::VehicleId;
use fleetwork::core::vehicle::{encode, Bus, Taxi, Truck, Vehicle, VehicleBase, VehicleError};

/// Strategy for non-blank free-form strings (ids, models, routes, plates).
fn non_blank_string() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 /-]{0,19}")
        .expect("valid regex")
        .prop_filter("must not be blank", |s| !s.trim().is_empty())
}

/// Strategy for valid years.
fn valid_year() -> impl Strategy<Value = i32> {
    1900..2100i32
}

/// Strategy for valid capacities.
fn valid_capacity() -> impl Strategy<Value = u32> {
    0..2000u32
}

/// Strategy for valid cargo ratings.
fn valid_cargo() -> impl Strategy<Value = f64> {
    (0u32..100_000u32).prop_map(|grams| f64::from(grams) / 1000.0)
}

fn base(id: &str, model: &str, year: i32, capacity: u32) -> VehicleBase {
    VehicleBase::new(VehicleId::new(id).unwrap(), model, year, capacity).unwrap()
}

fn decode(vehicle: &dyn Vehicle) -> Box<dyn Vehicle> {
    let record = encode(vehicle);
    VehicleCatalog::global().decode(&record).unwrap()
}

proptest! {
    /// Any valid bus round-trips through its record exactly.
    #[test]
    fn bus_record_roundtrip(
        id in non_blank_string(),
        model in non_blank_string(),
        year in valid_year(),
        capacity in valid_capacity(),
        route in non_blank_string(),
    ) {
        let bus = Bus::new(base(&id, &model, year, capacity), &route).unwrap();
        let restored = decode(&bus);

        prop_assert_eq!(&bus as &dyn Vehicle, &*restored);
        prop_assert_eq!(restored.base().id().as_str(), id.as_str());
        let restored = restored.as_any().downcast_ref::<Bus>().unwrap();
        prop_assert_eq!(restored.route_number(), route.as_str());
    }

    /// Any valid truck round-trips, preserving the cargo rating exactly.
    #[test]
    fn truck_record_roundtrip(
        id in non_blank_string(),
        model in non_blank_string(),
        year in valid_year(),
        capacity in valid_capacity(),
        cargo in valid_cargo(),
    ) {
        let truck = Truck::new(base(&id, &model, year, capacity), cargo).unwrap();
        let restored = decode(&truck);

        prop_assert_eq!(&truck as &dyn Vehicle, &*restored);
        let restored = restored.as_any().downcast_ref::<Truck>().unwrap();
        prop_assert_eq!(restored.cargo_capacity_tons(), cargo);
    }

    /// Any valid taxi round-trips, preserving the plate exactly.
    #[test]
    fn taxi_record_roundtrip(
        id in non_blank_string(),
        model in non_blank_string(),
        year in valid_year(),
        capacity in valid_capacity(),
        plate in non_blank_string(),
    ) {
        let taxi = Taxi::new(base(&id, &model, year, capacity), &plate).unwrap();
        let restored = decode(&taxi);

        prop_assert_eq!(&taxi as &dyn Vehicle, &*restored);
        let restored = restored.as_any().downcast_ref::<Taxi>().unwrap();
        prop_assert_eq!(restored.license_plate(), plate.as_str());
    }

    /// Every pre-1900 year is rejected at construction.
    #[test]
    fn early_years_are_rejected(year in -10_000..1900i32) {
        let result = VehicleBase::new(VehicleId::new("V-1").unwrap(), "Model", year, 10);
        prop_assert!(matches!(result, Err(VehicleError::Invalid(_))));
    }

    /// Every negative capacity in a record is rejected at decode.
    #[test]
    fn negative_record_capacities_are_rejected(capacity in -10_000..0i64) {
        let mut record = Map::new();
        record.insert("type".into(), Value::from("taxi"));
        record.insert("vehicle_id".into(), Value::from("TX-1"));
        record.insert("model".into(), Value::from("Skoda"));
        record.insert("year".into(), Value::from(2020));
        record.insert("capacity".into(), Value::from(capacity));
        record.insert("license_plate".into(), Value::from("ABC-777"));

        let result = VehicleCatalog::global().decode(&record);
        prop_assert!(matches!(result, Err(VehicleError::Invalid(_))));
    }

    /// Intrinsic and strategy costs stay non-negative for valid inputs.
    #[test]
    fn operating_cost_is_non_negative(
        capacity in valid_capacity(),
        distance in 0u32..10_000u32,
    ) {
        let bus = Bus::new(base("B-1", "LiAZ", 2020, capacity), "42").unwrap();
        prop_assert!(bus.operating_cost(f64::from(distance)) >= 0.0);
    }
}
