//! fleet
//!
//! The fleet facade and its collaborators.
//!
//! # Modules
//!
//! - [`authz`] - Principals and role gating
//! - [`costing`] - Pluggable trip-cost calculators
//! - [`maintenance`] - The maintenance approval chain
//! - [`log`] - The append-only action-log sink
//! - [`store`] - Snapshot persistence
//!
//! # Architecture
//!
//! [`Fleet`] is the aggregate root: it exclusively owns the vehicle and
//! driver collections, and every mutation flows through it. Mutating
//! operations are gated on declared role requirements
//! ([`authz::requirements`]) checked at the top of the operation body.
//! Lookups that miss fail loudly (`VehicleNotFound`/`DriverNotFound`);
//! removals of absent ids are deliberately silent no-ops.

pub mod authz;
pub mod costing;
pub mod log;
pub mod maintenance;
pub mod store;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::catalog::VehicleCatalog;
use crate::core::driver::Driver;
use crate::core::types::{DriverId, VehicleId};
use crate::core::vehicle::{Vehicle, VehicleError};

use authz::{requirements, Principal, RoleSet};
use log::{ActionLog, NullActionLog};
use store::StoreError;

/// Errors from facade operations.
#[derive(Debug, Error)]
pub enum FleetError {
    /// The principal holds none of the operation's required roles.
    #[error("permission denied: requires one of [{required}]")]
    PermissionDenied {
        /// Roles that would have admitted the caller.
        required: RoleSet,
    },

    /// A vehicle with this id is already in the fleet.
    #[error("duplicate vehicle id: {0}")]
    DuplicateVehicle(VehicleId),

    /// A driver with this id is already employed.
    #[error("duplicate driver id: {0}")]
    DuplicateDriver(DriverId),

    /// Lookup by vehicle id missed.
    #[error("vehicle not found: {0}")]
    VehicleNotFound(VehicleId),

    /// Lookup by driver id missed.
    #[error("driver not found: {0}")]
    DriverNotFound(DriverId),

    /// A vehicle-level failure surfaced through the facade.
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
}

/// The aggregate root: a named company owning vehicles and drivers.
///
/// # Example
///
/// ```
/// use fleetwork::core::catalog::{build_vehicle, VehicleCatalog};
/// use fleetwork::core::types::Role;
/// use fleetwork::fleet::authz::Principal;
/// use fleetwork::fleet::Fleet;
/// use serde_json::{Map, Value};
///
/// let mut fields = Map::new();
/// fields.insert("vehicle_id".into(), Value::from("B-1"));
/// fields.insert("model".into(), Value::from("LiAZ-5292"));
/// fields.insert("year".into(), Value::from(2020));
/// fields.insert("capacity".into(), Value::from(110));
/// fields.insert("route_number".into(), Value::from("42"));
/// let bus = build_vehicle(VehicleCatalog::global(), "bus", fields).unwrap();
///
/// let mut fleet = Fleet::new("TransCo");
/// let admin = Principal::new("alice", [Role::Admin]);
/// fleet.add_vehicle(&admin, bus).unwrap();
/// assert_eq!(fleet.vehicle_count(), 1);
/// ```
pub struct Fleet {
    name: String,
    vehicles: Vec<Box<dyn Vehicle>>,
    drivers: Vec<Driver>,
    action_log: Box<dyn ActionLog>,
}

impl Fleet {
    /// Create an empty fleet with no action-log sink.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vehicles: Vec::new(),
            drivers: Vec::new(),
            action_log: Box::new(NullActionLog),
        }
    }

    /// Rebuild a fleet from restored parts, enforcing id uniqueness.
    ///
    /// Used by snapshot loading; performs no authorization.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateVehicle`/`DuplicateDriver` when the parts
    /// contain repeated ids.
    pub fn restore(
        name: impl Into<String>,
        vehicles: Vec<Box<dyn Vehicle>>,
        drivers: Vec<Driver>,
    ) -> Result<Self, FleetError> {
        let mut fleet = Fleet::new(name);
        for vehicle in vehicles {
            fleet.insert_vehicle(vehicle)?;
        }
        for driver in drivers {
            fleet.insert_driver(driver)?;
        }
        Ok(fleet)
    }

    /// Attach an action-log sink.
    pub fn set_action_log(&mut self, sink: Box<dyn ActionLog>) {
        self.action_log = sink;
    }

    /// The company name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of vehicles in the fleet.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of drivers employed.
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Add a vehicle to the fleet.
    ///
    /// Requires any of {admin, manager, dispatcher}. Logs an action
    /// entry on success.
    ///
    /// # Errors
    ///
    /// - [`FleetError::PermissionDenied`] when the principal lacks roles
    /// - [`FleetError::DuplicateVehicle`] when the id is already present;
    ///   the original entry is unchanged
    pub fn add_vehicle(
        &mut self,
        principal: &Principal,
        vehicle: Box<dyn Vehicle>,
    ) -> Result<(), FleetError> {
        requirements::MUTATE.require(principal)?;
        let description = vehicle.describe();
        self.insert_vehicle(vehicle)?;
        self.action_log
            .record(&format!("{} added {}", principal.username(), description));
        Ok(())
    }

    /// Remove a vehicle by id.
    ///
    /// Requires any of {admin, manager}. Removing an absent id is a
    /// silent no-op — deliberately different from the loud `*NotFound`
    /// lookups. Drivers referencing the removed vehicle keep their now
    /// dangling link.
    pub fn remove_vehicle(
        &mut self,
        principal: &Principal,
        id: &VehicleId,
    ) -> Result<(), FleetError> {
        requirements::REMOVE.require(principal)?;
        self.vehicles.retain(|v| v.base().id() != id);
        Ok(())
    }

    /// Look up a vehicle by id.
    pub fn vehicle(&self, id: &VehicleId) -> Option<&dyn Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.base().id() == id)
            .map(|v| &**v)
    }

    /// Mutable lookup by id (location updates, status changes).
    pub fn vehicle_mut(&mut self, id: &VehicleId) -> Option<&mut dyn Vehicle> {
        self.vehicles
            .iter_mut()
            .find(|v| v.base().id() == id)
            .map(|v| &mut **v)
    }

    /// All vehicles, in insertion order.
    pub fn vehicles(&self) -> impl Iterator<Item = &dyn Vehicle> {
        self.vehicles.iter().map(|v| &**v)
    }

    /// Case-insensitive substring search over model names.
    ///
    /// Returns matches in insertion order.
    pub fn search_by_model(&self, query: &str) -> Vec<&dyn Vehicle> {
        let query = query.to_lowercase();
        self.vehicles()
            .filter(|v| v.base().model().to_lowercase().contains(&query))
            .collect()
    }

    /// Total passenger capacity per variant tag present in the fleet.
    pub fn stats_capacity_by_type(&self) -> BTreeMap<String, u64> {
        let mut stats: BTreeMap<String, u64> = BTreeMap::new();
        for vehicle in self.vehicles() {
            *stats.entry(vehicle.type_tag().to_string()).or_default() +=
                u64::from(vehicle.base().capacity());
        }
        stats
    }

    /// Hire a driver.
    ///
    /// Requires any of {admin, manager, dispatcher}.
    ///
    /// # Errors
    ///
    /// [`FleetError::DuplicateDriver`] when the id is already employed.
    pub fn add_driver(&mut self, principal: &Principal, driver: Driver) -> Result<(), FleetError> {
        requirements::MUTATE.require(principal)?;
        self.insert_driver(driver)
    }

    /// Remove a driver by id.
    ///
    /// Requires any of {admin, manager}. Absent ids are a silent no-op,
    /// mirroring [`Fleet::remove_vehicle`].
    pub fn remove_driver(
        &mut self,
        principal: &Principal,
        id: &DriverId,
    ) -> Result<(), FleetError> {
        requirements::REMOVE.require(principal)?;
        self.drivers.retain(|d| d.id() != id);
        Ok(())
    }

    /// Look up a driver by id, failing loudly on a miss.
    pub fn get_driver(&self, id: &DriverId) -> Result<&Driver, FleetError> {
        self.drivers
            .iter()
            .find(|d| d.id() == id)
            .ok_or_else(|| FleetError::DriverNotFound(id.clone()))
    }

    /// All drivers, in insertion order.
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter()
    }

    /// Link a driver to a vehicle.
    ///
    /// Requires any of {admin, manager, dispatcher}. Resolves the driver
    /// first, then the vehicle; a miss on either leaves the fleet
    /// unmodified. Logs an entry naming both on success.
    ///
    /// # Errors
    ///
    /// - [`FleetError::DriverNotFound`] / [`FleetError::VehicleNotFound`]
    pub fn assign_driver_to_vehicle(
        &mut self,
        principal: &Principal,
        driver_id: &DriverId,
        vehicle_id: &VehicleId,
    ) -> Result<(), FleetError> {
        requirements::MUTATE.require(principal)?;
        // The driver is resolved first; its miss takes precedence.
        let position = self
            .drivers
            .iter()
            .position(|d| d.id() == driver_id)
            .ok_or_else(|| FleetError::DriverNotFound(driver_id.clone()))?;
        let description = self
            .vehicle(vehicle_id)
            .map(|v| v.describe())
            .ok_or_else(|| FleetError::VehicleNotFound(vehicle_id.clone()))?;

        let driver = &mut self.drivers[position];
        driver.assign_vehicle(vehicle_id.clone());
        let message = format!(
            "driver {} assigned to {} by {}",
            driver.name(),
            description,
            principal.username()
        );
        self.action_log.record(&message);
        Ok(())
    }

    /// Serialize the whole aggregate to its snapshot file.
    ///
    /// See [`store::save`] for path resolution.
    pub fn save(&self, data_dir: &Path, path: Option<&Path>) -> Result<PathBuf, StoreError> {
        store::save(self, data_dir, path)
    }

    /// Restore a fleet from its snapshot file.
    ///
    /// See [`store::load`]; a missing file fails with
    /// [`StoreError::NotFound`].
    pub fn load(
        catalog: &VehicleCatalog,
        data_dir: &Path,
        path: Option<&Path>,
    ) -> Result<Fleet, StoreError> {
        store::load(catalog, data_dir, path)
    }

    fn insert_vehicle(&mut self, vehicle: Box<dyn Vehicle>) -> Result<(), FleetError> {
        let id = vehicle.base().id();
        if self.vehicle(id).is_some() {
            return Err(FleetError::DuplicateVehicle(id.clone()));
        }
        self.vehicles.push(vehicle);
        Ok(())
    }

    fn insert_driver(&mut self, driver: Driver) -> Result<(), FleetError> {
        if self.drivers.iter().any(|d| d.id() == driver.id()) {
            return Err(FleetError::DuplicateDriver(driver.id().clone()));
        }
        self.drivers.push(driver);
        Ok(())
    }
}

impl std::fmt::Debug for Fleet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fleet")
            .field("name", &self.name)
            .field("vehicles", &self.vehicles.len())
            .field("drivers", &self.drivers.len())
            .finish()
    }
}
