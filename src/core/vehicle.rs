//! core::vehicle
//!
//! The vehicle model: validated common attributes, concrete variants, and
//! the tagged-record serialization contract.
//!
//! # Architecture
//!
//! Every vehicle is a [`Vehicle`] trait object wrapping a [`VehicleBase`]
//! (the validated common attributes) plus variant-specific fields. Variants
//! contribute their own record keys via [`Vehicle::encode_extra`] and their
//! own decode function, registered in the
//! [`VehicleCatalog`](crate::core::catalog::VehicleCatalog). The catalog is
//! what lets new variants be added without touching the facade or the
//! serializer.
//!
//! # Invariants
//!
//! - `year >= 1900` and field non-emptiness are enforced at construction
//!   and on every setter; a failed mutation leaves the vehicle unchanged
//! - `capacity` is unsigned; negative values are unrepresentable, and the
//!   record-decode path rejects negative raw numbers
//! - Two vehicles are equal iff `(year, capacity, model)` match; ordering
//!   compares `(year, capacity)` lexicographically
//!
//! # Example
//!
//! ```
//! use fleetwork::core::types::VehicleId;
//! use fleetwork::core::vehicle::{Bus, Vehicle, VehicleBase};
//!
//! let base = VehicleBase::new(VehicleId::new("B-1").unwrap(), "LiAZ-5292", 2020, 110).unwrap();
//! let bus = Bus::new(base, "42").unwrap();
//! assert_eq!(bus.type_tag(), "bus");
//! assert_eq!(bus.operating_cost(25.0), 35.5);
//! ```

use std::any::Any;

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{TypeError, VehicleId, VehicleStatus};

/// Sentinel for a vehicle whose position has never been reported.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Errors from vehicle construction, mutation, and record handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VehicleError {
    /// A field invariant was violated (bad year, empty required string, ...).
    #[error("invalid vehicle: {0}")]
    Invalid(String),

    /// The record's type tag is not registered in the catalog.
    #[error("unknown vehicle type: {0}")]
    UnknownType(String),

    /// The record is structurally unusable (missing key, wrong value kind).
    #[error("malformed vehicle record: {0}")]
    MalformedRecord(String),

    /// Identifier validation failed.
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Round a cost to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validated attributes common to every vehicle.
///
/// Held by composition inside each variant. Setters re-validate, so a
/// constructed base can never drift into an invalid state.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleBase {
    id: VehicleId,
    model: String,
    year: i32,
    capacity: u32,
    status: VehicleStatus,
    last_location: String,
}

impl VehicleBase {
    /// Create a base with status [`VehicleStatus::Idle`].
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty model or a year
    /// before 1900.
    pub fn new(
        id: VehicleId,
        model: impl Into<String>,
        year: i32,
        capacity: u32,
    ) -> Result<Self, VehicleError> {
        Self::with_status(id, model, year, capacity, VehicleStatus::Idle)
    }

    /// Create a base with an explicit status.
    pub fn with_status(
        id: VehicleId,
        model: impl Into<String>,
        year: i32,
        capacity: u32,
        status: VehicleStatus,
    ) -> Result<Self, VehicleError> {
        let model = model.into();
        validate_model(&model)?;
        validate_year(year)?;
        Ok(Self {
            id,
            model,
            year,
            capacity,
            status,
            last_location: UNKNOWN_LOCATION.to_string(),
        })
    }

    /// The vehicle's unique id.
    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Reassign the stored id.
    ///
    /// Emptiness is rejected by [`VehicleId`] itself, so the replacement
    /// is always valid.
    pub fn set_id(&mut self, id: VehicleId) {
        self.id = id;
    }

    /// The model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replace the model name.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty model.
    pub fn set_model(&mut self, model: impl Into<String>) -> Result<(), VehicleError> {
        let model = model.into();
        validate_model(&model)?;
        self.model = model;
        Ok(())
    }

    /// The year of manufacture.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Replace the year of manufacture.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for a year before 1900.
    pub fn set_year(&mut self, year: i32) -> Result<(), VehicleError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Passenger capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Replace the capacity. Negative values are unrepresentable.
    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
    }

    /// Current operational status.
    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    /// Replace the status. The closed enum admits no invalid state.
    pub fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    /// Last reported position, or [`UNKNOWN_LOCATION`].
    pub fn last_location(&self) -> &str {
        &self.last_location
    }

    /// Record a newly reported position.
    pub fn update_location(&mut self, location: impl Into<String>) {
        self.last_location = location.into();
    }
}

fn validate_model(model: &str) -> Result<(), VehicleError> {
    if model.trim().is_empty() {
        return Err(VehicleError::Invalid("model cannot be empty".into()));
    }
    Ok(())
}

fn validate_year(year: i32) -> Result<(), VehicleError> {
    if year < 1900 {
        return Err(VehicleError::Invalid(format!(
            "year {} is before 1900",
            year
        )));
    }
    Ok(())
}

/// The vehicle contract shared by all variants.
///
/// Variants supply their type tag, their intrinsic cost formula, their
/// display string, and the variant-specific record keys. Common state
/// lives in the [`VehicleBase`] each variant holds.
pub trait Vehicle: Any {
    /// The validated common attributes.
    fn base(&self) -> &VehicleBase;

    /// Mutable access to the common attributes.
    fn base_mut(&mut self) -> &mut VehicleBase;

    /// Lower-case tag identifying the variant (`"bus"`, `"truck"`, ...).
    ///
    /// This is the key used in records and in the catalog.
    fn type_tag(&self) -> &'static str;

    /// The vehicle's own cost of operating over `distance_km`.
    ///
    /// Each variant carries its own constants. This is deliberately
    /// independent of the pluggable calculators in
    /// [`fleet::costing`](crate::fleet::costing).
    fn operating_cost(&self, distance_km: f64) -> f64;

    /// One-line human description for listings.
    fn describe(&self) -> String;

    /// Append variant-specific keys to a record under construction.
    fn encode_extra(&self, record: &mut Map<String, Value>);

    /// Clone into a fresh boxed trait object.
    fn clone_box(&self) -> Box<dyn Vehicle>;

    /// Upcast for variant-specific downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Vehicle> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vehicle")
            .field("type", &self.type_tag())
            .field("id", &self.base().id().as_str())
            .field("model", &self.base().model())
            .finish()
    }
}

/// Vehicles compare equal iff `(year, capacity, model)` match.
///
/// Identity (the id) deliberately plays no part; equality is about the
/// physical characteristics, not the fleet slot.
impl PartialEq for dyn Vehicle {
    fn eq(&self, other: &Self) -> bool {
        let a = self.base();
        let b = other.base();
        (a.year(), a.capacity(), a.model()) == (b.year(), b.capacity(), b.model())
    }
}

/// Ordering is lexicographic on `(year, capacity)`.
impl PartialOrd for dyn Vehicle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let a = self.base();
        let b = other.base();
        Some((a.year(), a.capacity()).cmp(&(b.year(), b.capacity())))
    }
}

/// Location-query capability.
///
/// The tracking state itself (the last reported position) lives in the
/// vehicle base; this trait only renders it.
pub trait Trackable: Vehicle {
    /// Describe the vehicle's current position.
    fn track_location(&self) -> String;
}

/// Trip-report capability.
pub trait Reportable: Vehicle {
    /// Render a report over the vehicle's last trip.
    fn trip_report(&self) -> String;
}

/// Encode a vehicle into a tagged record.
///
/// Required keys are always present: `type`, `vehicle_id`, `model`,
/// `year`, `capacity`, `status`. Variant keys follow.
///
/// # Example
///
/// ```
/// use fleetwork::core::types::VehicleId;
/// use fleetwork::core::vehicle::{encode, Taxi, VehicleBase};
///
/// let base = VehicleBase::new(VehicleId::new("TX-7").unwrap(), "Skoda Octavia", 2022, 4).unwrap();
/// let taxi = Taxi::new(base, "ABC-777").unwrap();
/// let record = encode(&taxi);
/// assert_eq!(record["type"], "taxi");
/// assert_eq!(record["license_plate"], "ABC-777");
/// ```
pub fn encode(vehicle: &dyn Vehicle) -> Map<String, Value> {
    let base = vehicle.base();
    let mut record = Map::new();
    record.insert("type".into(), Value::from(vehicle.type_tag()));
    record.insert("vehicle_id".into(), Value::from(base.id().as_str()));
    record.insert("model".into(), Value::from(base.model()));
    record.insert("year".into(), Value::from(base.year()));
    record.insert("capacity".into(), Value::from(base.capacity()));
    record.insert("status".into(), Value::from(base.status().name()));
    vehicle.encode_extra(&mut record);
    record
}

/// Field extraction helpers shared by the variant decode functions.
///
/// Decode policy: `vehicle_id`, `model`, `year`, `capacity`, and the
/// variant's required strings must be present; `status` defaults to
/// `idle`; optional numeric fields default to `0.0`.
pub(crate) mod field {
    use super::*;

    pub fn required_str<'a>(
        record: &'a Map<String, Value>,
        key: &str,
    ) -> Result<&'a str, VehicleError> {
        record
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| VehicleError::MalformedRecord(format!("missing string key '{}'", key)))
    }

    pub fn required_int(record: &Map<String, Value>, key: &str) -> Result<i64, VehicleError> {
        record
            .get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| VehicleError::MalformedRecord(format!("missing integer key '{}'", key)))
    }

    pub fn optional_f64(record: &Map<String, Value>, key: &str) -> f64 {
        record.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn status(record: &Map<String, Value>) -> Result<VehicleStatus, VehicleError> {
        match record.get("status") {
            None | Some(Value::Null) => Ok(VehicleStatus::Idle),
            Some(value) => {
                let s = value.as_str().ok_or_else(|| {
                    VehicleError::MalformedRecord("'status' is not a string".into())
                })?;
                VehicleStatus::parse(s)
                    .ok_or_else(|| VehicleError::Invalid(format!("invalid status '{}'", s)))
            }
        }
    }

    /// Decode the common attributes of any variant record.
    pub fn base(record: &Map<String, Value>) -> Result<VehicleBase, VehicleError> {
        let id = VehicleId::new(required_str(record, "vehicle_id")?)?;
        let model = required_str(record, "model")?;
        let year = required_int(record, "year")?;
        let capacity = required_int(record, "capacity")?;
        let year = i32::try_from(year)
            .map_err(|_| VehicleError::Invalid(format!("year {} out of range", year)))?;
        let capacity = u32::try_from(capacity)
            .map_err(|_| VehicleError::Invalid(format!("invalid capacity {}", capacity)))?;
        VehicleBase::with_status(id, model, year, capacity, status(record)?)
    }
}

/// A bus with a fixed route number.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    base: VehicleBase,
    route_number: String,
}

impl Bus {
    /// Catalog tag for this variant.
    pub const TAG: &'static str = "bus";

    /// Create a bus.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty route number.
    pub fn new(base: VehicleBase, route_number: impl Into<String>) -> Result<Self, VehicleError> {
        let route_number = route_number.into();
        validate_route_number(&route_number)?;
        Ok(Self { base, route_number })
    }

    /// The route this bus serves.
    pub fn route_number(&self) -> &str {
        &self.route_number
    }

    /// Reassign the route.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty route number.
    pub fn set_route_number(&mut self, route: impl Into<String>) -> Result<(), VehicleError> {
        let route = route.into();
        validate_route_number(&route)?;
        self.route_number = route;
        Ok(())
    }

    /// Decode function registered in the catalog.
    pub(crate) fn decode(record: &Map<String, Value>) -> Result<Box<dyn Vehicle>, VehicleError> {
        let base = field::base(record)?;
        let route = field::required_str(record, "route_number")?;
        Ok(Box::new(Bus::new(base, route)?))
    }
}

fn validate_route_number(route: &str) -> Result<(), VehicleError> {
    if route.trim().is_empty() {
        return Err(VehicleError::Invalid("route number cannot be empty".into()));
    }
    Ok(())
}

impl Vehicle for Bus {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn operating_cost(&self, distance_km: f64) -> f64 {
        round2(1.2 * distance_km + 0.05 * f64::from(self.base.capacity()))
    }

    fn describe(&self) -> String {
        format!(
            "bus {}, route {}, year {}",
            self.base.model(),
            self.route_number,
            self.base.year()
        )
    }

    fn encode_extra(&self, record: &mut Map<String, Value>) {
        record.insert("route_number".into(), Value::from(self.route_number.clone()));
    }

    fn clone_box(&self) -> Box<dyn Vehicle> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Trackable for Bus {
    fn track_location(&self) -> String {
        format!(
            "bus {} on route {} at {}",
            self.base.model(),
            self.route_number,
            self.base.last_location()
        )
    }
}

/// A truck with a cargo rating in tons.
#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    base: VehicleBase,
    cargo_capacity_tons: f64,
}

impl Truck {
    /// Catalog tag for this variant.
    pub const TAG: &'static str = "truck";

    /// Create a truck.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for a negative cargo rating.
    pub fn new(base: VehicleBase, cargo_capacity_tons: f64) -> Result<Self, VehicleError> {
        validate_cargo(cargo_capacity_tons)?;
        Ok(Self {
            base,
            cargo_capacity_tons,
        })
    }

    /// Cargo rating in tons.
    pub fn cargo_capacity_tons(&self) -> f64 {
        self.cargo_capacity_tons
    }

    /// Reassign the cargo rating.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for a negative rating.
    pub fn set_cargo_capacity_tons(&mut self, tons: f64) -> Result<(), VehicleError> {
        validate_cargo(tons)?;
        self.cargo_capacity_tons = tons;
        Ok(())
    }

    /// Decode function registered in the catalog.
    ///
    /// `cargo_capacity_tons` defaults to `0.0` when absent.
    pub(crate) fn decode(record: &Map<String, Value>) -> Result<Box<dyn Vehicle>, VehicleError> {
        let base = field::base(record)?;
        let tons = field::optional_f64(record, "cargo_capacity_tons");
        Ok(Box::new(Truck::new(base, tons)?))
    }
}

fn validate_cargo(tons: f64) -> Result<(), VehicleError> {
    if tons < 0.0 {
        return Err(VehicleError::Invalid(format!(
            "negative cargo capacity: {}",
            tons
        )));
    }
    Ok(())
}

impl Vehicle for Truck {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn operating_cost(&self, distance_km: f64) -> f64 {
        round2(2.0 * distance_km + 10.0 * self.cargo_capacity_tons)
    }

    fn describe(&self) -> String {
        format!(
            "truck {}, {} t, year {}",
            self.base.model(),
            self.cargo_capacity_tons,
            self.base.year()
        )
    }

    fn encode_extra(&self, record: &mut Map<String, Value>) {
        record.insert(
            "cargo_capacity_tons".into(),
            Value::from(self.cargo_capacity_tons),
        );
    }

    fn clone_box(&self) -> Box<dyn Vehicle> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A taxi with a license plate.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxi {
    base: VehicleBase,
    license_plate: String,
}

impl Taxi {
    /// Catalog tag for this variant.
    pub const TAG: &'static str = "taxi";

    /// Create a taxi.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty license plate.
    pub fn new(base: VehicleBase, license_plate: impl Into<String>) -> Result<Self, VehicleError> {
        let license_plate = license_plate.into();
        validate_plate(&license_plate)?;
        Ok(Self {
            base,
            license_plate,
        })
    }

    /// The registration plate.
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Reassign the plate.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::Invalid` for an empty plate.
    pub fn set_license_plate(&mut self, plate: impl Into<String>) -> Result<(), VehicleError> {
        let plate = plate.into();
        validate_plate(&plate)?;
        self.license_plate = plate;
        Ok(())
    }

    /// Decode function registered in the catalog.
    pub(crate) fn decode(record: &Map<String, Value>) -> Result<Box<dyn Vehicle>, VehicleError> {
        let base = field::base(record)?;
        let plate = field::required_str(record, "license_plate")?;
        Ok(Box::new(Taxi::new(base, plate)?))
    }
}

fn validate_plate(plate: &str) -> Result<(), VehicleError> {
    if plate.trim().is_empty() {
        return Err(VehicleError::Invalid(
            "license plate cannot be empty".into(),
        ));
    }
    Ok(())
}

impl Vehicle for Taxi {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn type_tag(&self) -> &'static str {
        Self::TAG
    }

    fn operating_cost(&self, distance_km: f64) -> f64 {
        round2(3.0 + 0.8 * distance_km)
    }

    fn describe(&self) -> String {
        format!(
            "taxi {}, plate {}, year {}",
            self.base.model(),
            self.license_plate,
            self.base.year()
        )
    }

    fn encode_extra(&self, record: &mut Map<String, Value>) {
        record.insert(
            "license_plate".into(),
            Value::from(self.license_plate.clone()),
        );
    }

    fn clone_box(&self) -> Box<dyn Vehicle> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reportable for Taxi {
    fn trip_report(&self) -> String {
        format!(
            "trip report for taxi {}: status={}, last position={}",
            self.license_plate,
            self.base.status(),
            self.base.last_location()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VehicleId;

    fn base(id: &str, model: &str, year: i32, capacity: u32) -> VehicleBase {
        VehicleBase::new(VehicleId::new(id).unwrap(), model, year, capacity).unwrap()
    }

    mod validation {
        use super::*;

        #[test]
        fn rejects_year_before_1900() {
            let result = VehicleBase::new(VehicleId::new("B-1").unwrap(), "OldTimer", 1899, 10);
            assert!(matches!(result, Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn accepts_year_1900_boundary() {
            assert!(VehicleBase::new(VehicleId::new("B-1").unwrap(), "Veteran", 1900, 10).is_ok());
        }

        #[test]
        fn rejects_empty_model() {
            let result = VehicleBase::new(VehicleId::new("B-1").unwrap(), "  ", 2020, 10);
            assert!(matches!(result, Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn setter_failure_leaves_state_unchanged() {
            let mut b = base("B-1", "LiAZ", 2020, 110);
            assert!(b.set_year(1800).is_err());
            assert_eq!(b.year(), 2020);
            assert!(b.set_model("").is_err());
            assert_eq!(b.model(), "LiAZ");
        }

        #[test]
        fn rejects_empty_route_number() {
            let result = Bus::new(base("B-1", "LiAZ", 2020, 110), "");
            assert!(matches!(result, Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn rejects_negative_cargo() {
            let result = Truck::new(base("T-1", "Volvo FH", 2018, 2), -1.0);
            assert!(matches!(result, Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn rejects_empty_plate() {
            let result = Taxi::new(base("TX-1", "Skoda", 2022, 4), " ");
            assert!(matches!(result, Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn default_status_is_idle_and_location_unknown() {
            let b = base("B-1", "LiAZ", 2020, 110);
            assert_eq!(b.status(), VehicleStatus::Idle);
            assert_eq!(b.last_location(), UNKNOWN_LOCATION);
        }
    }

    mod intrinsic_cost {
        use super::*;

        #[test]
        fn bus_formula() {
            let bus = Bus::new(base("B-1", "LiAZ", 2020, 110), "42").unwrap();
            // 1.2 * 25 + 0.05 * 110 = 30 + 5.5
            assert_eq!(bus.operating_cost(25.0), 35.5);
        }

        #[test]
        fn truck_formula() {
            let truck = Truck::new(base("T-1", "Volvo FH", 2018, 2), 20.0).unwrap();
            // 2.0 * 200 + 10.0 * 20 = 600
            assert_eq!(truck.operating_cost(200.0), 600.0);
        }

        #[test]
        fn taxi_formula() {
            let taxi = Taxi::new(base("TX-7", "Skoda", 2022, 4), "ABC-777").unwrap();
            // 3.0 + 0.8 * 12.5 = 13.0
            assert_eq!(taxi.operating_cost(12.5), 13.0);
        }
    }

    mod equality_and_ordering {
        use super::*;

        #[test]
        fn equal_on_year_capacity_model() {
            let a: Box<dyn Vehicle> = Box::new(Bus::new(base("B-1", "LiAZ", 2020, 110), "42").unwrap());
            let b: Box<dyn Vehicle> =
                Box::new(Bus::new(base("B-2", "LiAZ", 2020, 110), "7").unwrap());
            // Different ids and routes, same (year, capacity, model).
            assert_eq!(&*a, &*b);
        }

        #[test]
        fn unequal_on_different_model() {
            let a: Box<dyn Vehicle> = Box::new(Bus::new(base("B-1", "LiAZ", 2020, 110), "42").unwrap());
            let b: Box<dyn Vehicle> =
                Box::new(Bus::new(base("B-1", "MAZ", 2020, 110), "42").unwrap());
            assert_ne!(&*a, &*b);
        }

        #[test]
        fn ordering_ignores_model() {
            let older: Box<dyn Vehicle> =
                Box::new(Taxi::new(base("TX-1", "Zebra", 2018, 4), "A-1").unwrap());
            let newer: Box<dyn Vehicle> =
                Box::new(Taxi::new(base("TX-2", "Aardvark", 2022, 4), "A-2").unwrap());
            assert!(&*older < &*newer);
        }

        #[test]
        fn ordering_breaks_ties_on_capacity() {
            let small: Box<dyn Vehicle> =
                Box::new(Bus::new(base("B-1", "LiAZ", 2020, 90), "1").unwrap());
            let large: Box<dyn Vehicle> =
                Box::new(Bus::new(base("B-2", "LiAZ", 2020, 110), "2").unwrap());
            assert!(&*small < &*large);
        }
    }

    mod capabilities {
        use super::*;

        #[test]
        fn bus_tracks_location() {
            let mut bus = Bus::new(base("B-2", "MAZ-203", 2019, 100), "7").unwrap();
            bus.base_mut().update_location("N55.79 E49.11");
            let line = bus.track_location();
            assert!(line.contains("MAZ-203"));
            assert!(line.contains("route 7"));
            assert!(line.contains("N55.79 E49.11"));
        }

        #[test]
        fn taxi_reports_trip() {
            let mut taxi = Taxi::new(base("TX-7", "Skoda", 2022, 4), "ABC-777").unwrap();
            taxi.base_mut().update_location("N55.79 E49.12");
            let report = taxi.trip_report();
            assert!(report.contains("ABC-777"));
            assert!(report.contains("status=idle"));
            assert!(report.contains("N55.79 E49.12"));
        }
    }

    mod records {
        use super::*;

        #[test]
        fn encode_carries_required_and_variant_keys() {
            let truck = Truck::new(base("T-1", "Volvo FH", 2018, 2), 20.0).unwrap();
            let record = encode(&truck);
            assert_eq!(record["type"], "truck");
            assert_eq!(record["vehicle_id"], "T-1");
            assert_eq!(record["model"], "Volvo FH");
            assert_eq!(record["year"], 2018);
            assert_eq!(record["capacity"], 2);
            assert_eq!(record["status"], "idle");
            assert_eq!(record["cargo_capacity_tons"], 20.0);
        }

        #[test]
        fn decode_defaults_status_to_idle() {
            let mut record = Map::new();
            record.insert("vehicle_id".into(), Value::from("T-1"));
            record.insert("model".into(), Value::from("Volvo FH"));
            record.insert("year".into(), Value::from(2018));
            record.insert("capacity".into(), Value::from(2));
            let truck = Truck::decode(&record).unwrap();
            assert_eq!(truck.base().status(), VehicleStatus::Idle);
            // Missing cargo rating defaults to 0.0.
            let truck = truck.as_any().downcast_ref::<Truck>().unwrap();
            assert_eq!(truck.cargo_capacity_tons(), 0.0);
        }

        #[test]
        fn decode_rejects_negative_capacity() {
            let mut record = Map::new();
            record.insert("vehicle_id".into(), Value::from("T-1"));
            record.insert("model".into(), Value::from("Volvo FH"));
            record.insert("year".into(), Value::from(2018));
            record.insert("capacity".into(), Value::from(-1));
            assert!(matches!(
                Truck::decode(&record),
                Err(VehicleError::Invalid(_))
            ));
        }

        #[test]
        fn decode_rejects_unknown_status() {
            let mut record = Map::new();
            record.insert("vehicle_id".into(), Value::from("B-1"));
            record.insert("model".into(), Value::from("LiAZ"));
            record.insert("year".into(), Value::from(2020));
            record.insert("capacity".into(), Value::from(110));
            record.insert("status".into(), Value::from("flying"));
            record.insert("route_number".into(), Value::from("42"));
            assert!(matches!(Bus::decode(&record), Err(VehicleError::Invalid(_))));
        }

        #[test]
        fn decode_rejects_missing_required_key() {
            let record = Map::new();
            assert!(matches!(
                Bus::decode(&record),
                Err(VehicleError::MalformedRecord(_))
            ));
        }
    }

    mod round2_fn {
        use super::*;

        #[test]
        fn rounds_to_cents() {
            assert_eq!(round2(0.125), 0.13);
            assert_eq!(round2(13.0), 13.0);
            assert_eq!(round2(30.499), 30.5);
        }
    }
}
