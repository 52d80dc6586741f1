//! core::driver
//!
//! Drivers and their addresses.
//!
//! A driver references an assigned vehicle by id; it never owns one. The
//! fleet facade resolves the reference, and removing a vehicle does not
//! reach back into drivers (see the facade's stale-reference notes).

use serde::{Deserialize, Serialize};

use super::types::{DriverId, VehicleId};

/// A driver's home address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub house: String,
}

impl Address {
    /// Create an address.
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        house: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            house: house.into(),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} {}", self.city, self.street, self.house)
    }
}

/// A driver employed by the company.
///
/// # Example
///
/// ```
/// use fleetwork::core::driver::{Address, Driver};
/// use fleetwork::core::types::{DriverId, VehicleId};
///
/// let mut driver = Driver::new(
///     "Ivan Petrov",
///     DriverId::new("D001").unwrap(),
///     "D",
///     Address::new("Kazan", "Lenina", "10"),
/// );
/// assert!(driver.assigned_vehicle().is_none());
///
/// driver.assign_vehicle(VehicleId::new("B-1").unwrap());
/// assert!(driver.assigned_vehicle().is_some());
///
/// driver.unassign_vehicle();
/// assert!(driver.assigned_vehicle().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    name: String,
    id: DriverId,
    license_type: String,
    address: Address,
    assigned_vehicle: Option<VehicleId>,
}

impl Driver {
    /// Create an unassigned driver.
    pub fn new(
        name: impl Into<String>,
        id: DriverId,
        license_type: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            license_type: license_type.into(),
            address,
            assigned_vehicle: None,
        }
    }

    /// The driver's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The driver's unique id.
    pub fn id(&self) -> &DriverId {
        &self.id
    }

    /// The license category the driver holds.
    pub fn license_type(&self) -> &str {
        &self.license_type
    }

    /// The driver's home address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The id of the assigned vehicle, if any.
    ///
    /// This is a non-owning reference into the fleet's vehicle store; the
    /// referent may have been removed since assignment.
    pub fn assigned_vehicle(&self) -> Option<&VehicleId> {
        self.assigned_vehicle.as_ref()
    }

    /// Link this driver to a vehicle.
    pub fn assign_vehicle(&mut self, vehicle: VehicleId) {
        self.assigned_vehicle = Some(vehicle);
    }

    /// Clear the vehicle link.
    pub fn unassign_vehicle(&mut self) {
        self.assigned_vehicle = None;
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), license {}",
            self.name, self.id, self.license_type
        )
    }
}
