//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`VehicleId`] - Validated vehicle identifier
//! - [`DriverId`] - Validated driver identifier
//! - [`VehicleStatus`] - Closed set of operational states
//! - [`Role`] - Closed set of principal roles
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! Identifier types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use fleetwork::core::types::{VehicleId, VehicleStatus};
//!
//! // Valid constructions
//! let id = VehicleId::new("B-1").unwrap();
//! let status = VehicleStatus::parse("on_route").unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(VehicleId::new("").is_err());
//! assert!(VehicleStatus::parse("flying").is_none());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid vehicle id: {0}")]
    InvalidVehicleId(String),

    #[error("invalid driver id: {0}")]
    InvalidDriverId(String),
}

/// A validated vehicle identifier.
///
/// Vehicle ids are free-form but must be non-empty and may not consist
/// entirely of whitespace. They are the unique key within a fleet.
///
/// # Example
///
/// ```
/// use fleetwork::core::types::VehicleId;
///
/// let id = VehicleId::new("T-42").unwrap();
/// assert_eq!(id.as_str(), "T-42");
///
/// assert!(VehicleId::new("").is_err());
/// assert!(VehicleId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a new validated vehicle id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVehicleId` if the id is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypeError::InvalidVehicleId(
                "vehicle id cannot be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VehicleId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<VehicleId> for String {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated driver identifier.
///
/// Same rules as [`VehicleId`]: non-empty, not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DriverId(String);

impl DriverId {
    /// Create a new validated driver id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDriverId` if the id is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TypeError::InvalidDriverId(
                "driver id cannot be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DriverId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DriverId> for String {
    fn from(id: DriverId) -> Self {
        id.0
    }
}

impl AsRef<str> for DriverId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational status of a vehicle.
///
/// Any assignment outside this set is rejected at parse time; the wire
/// format uses the snake_case names.
///
/// # Example
///
/// ```
/// use fleetwork::core::types::VehicleStatus;
///
/// assert_eq!(VehicleStatus::parse("idle"), Some(VehicleStatus::Idle));
/// assert_eq!(VehicleStatus::OnRoute.name(), "on_route");
/// assert_eq!(VehicleStatus::default(), VehicleStatus::Idle);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Parked and available.
    #[default]
    Idle,
    /// Currently out on a route.
    OnRoute,
    /// In the workshop.
    Maintenance,
    /// Withdrawn from service.
    Retired,
}

impl VehicleStatus {
    /// All statuses, in declaration order.
    pub fn all() -> &'static [VehicleStatus] {
        &[
            VehicleStatus::Idle,
            VehicleStatus::OnRoute,
            VehicleStatus::Maintenance,
            VehicleStatus::Retired,
        ]
    }

    /// Get the status name as used in records and config files.
    pub fn name(&self) -> &'static str {
        match self {
            VehicleStatus::Idle => "idle",
            VehicleStatus::OnRoute => "on_route",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Retired => "retired",
        }
    }

    /// Parse a status from its wire name.
    ///
    /// Returns `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(VehicleStatus::Idle),
            "on_route" => Some(VehicleStatus::OnRoute),
            "maintenance" => Some(VehicleStatus::Maintenance),
            "retired" => Some(VehicleStatus::Retired),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A role held by a principal.
///
/// Roles gate the mutating fleet operations. The set is closed; parsing
/// is case-insensitive.
///
/// # Example
///
/// ```
/// use fleetwork::core::types::Role;
///
/// assert_eq!(Role::parse("admin"), Some(Role::Admin));
/// assert_eq!(Role::parse("Dispatcher"), Some(Role::Dispatcher));
/// assert_eq!(Role::parse("janitor"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to all operations.
    Admin,
    /// Fleet management, including removals.
    Manager,
    /// Day-to-day additions and assignments.
    Dispatcher,
}

impl Role {
    /// All roles, in declaration order.
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Manager, Role::Dispatcher]
    }

    /// Get the role name as used in config files and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Dispatcher => "dispatcher",
        }
    }

    /// Parse a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "dispatcher" => Some(Role::Dispatcher),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An RFC3339 timestamp in UTC.
///
/// Used for action-log entries.
///
/// # Example
///
/// ```
/// use fleetwork::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
