//! fleet::authz
//!
//! Role gating for facade operations.
//!
//! # Architecture
//!
//! Each mutating facade operation declares its required roles as a
//! [`RoleSet`]. Gating checks the caller's [`Principal`] against that set
//! at the top of the operation body; one held role from the set admits.
//! There is no global "caller is privileged" boolean — every operation
//! names its own requirement.
//!
//! # Example
//!
//! ```
//! use fleetwork::core::types::Role;
//! use fleetwork::fleet::authz::{requirements, Principal};
//!
//! let dispatcher = Principal::new("bob", [Role::Dispatcher]);
//! assert!(requirements::MUTATE.satisfied_by(&dispatcher));
//! assert!(!requirements::REMOVE.satisfied_by(&dispatcher));
//! ```

use std::collections::BTreeSet;

use crate::core::types::Role;

use super::FleetError;

/// The caller of a facade operation: a username plus held roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    /// Create a principal with the given roles.
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// The principal's username, used in action-log entries.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The roles this principal holds.
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Whether the principal holds any of the given roles.
    pub fn holds_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.username, role_names(&self.roles))
    }
}

/// Requirement declared by a facade operation.
///
/// Satisfied when the intersection of required and held roles is
/// non-empty.
#[derive(Debug, Clone, Copy)]
pub struct RoleSet {
    /// Required roles; any one suffices.
    pub roles: &'static [Role],
    /// Human-readable name for this requirement set.
    pub name: &'static str,
}

impl RoleSet {
    /// Create a new requirement set.
    pub const fn new(name: &'static str, roles: &'static [Role]) -> Self {
        Self { roles, name }
    }

    /// Check whether the principal satisfies this requirement.
    pub fn satisfied_by(&self, principal: &Principal) -> bool {
        principal.holds_any(self.roles)
    }

    /// Gate an operation on this requirement.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::PermissionDenied`] naming the required roles.
    pub fn require(&self, principal: &Principal) -> Result<(), FleetError> {
        if self.satisfied_by(principal) {
            return Ok(());
        }
        Err(FleetError::PermissionDenied { required: *self })
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", role_names(self.roles))
    }
}

/// Requirement sets for the facade operations.
pub mod requirements {
    use super::RoleSet;
    use crate::core::types::Role;

    /// Additions and assignments: any operational role.
    pub const MUTATE: RoleSet = RoleSet::new(
        "mutate",
        &[Role::Admin, Role::Manager, Role::Dispatcher],
    );

    /// Removals: management only.
    pub const REMOVE: RoleSet = RoleSet::new("remove", &[Role::Admin, Role::Manager]);
}

/// Render roles as a comma-separated list of names.
pub(crate) fn role_names<'a>(roles: impl IntoIterator<Item = &'a Role>) -> String {
    roles
        .into_iter()
        .map(Role::name)
        .collect::<Vec<_>>()
        .join(", ")
}
