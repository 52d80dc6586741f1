//! fleet::maintenance
//!
//! The maintenance approval chain.
//!
//! # Design
//!
//! Approvers are stateless handlers, each owning a cost band. A request
//! walks the chain in composition order; the first approver whose band
//! matches produces the approval. Order is significant — the standard
//! chain runs Mechanic → DepartmentHead → Director — and is composed
//! explicitly with [`ApprovalChain::then`], never hard-coded into a
//! handler.
//!
//! # Example
//!
//! ```
//! use fleetwork::core::types::VehicleId;
//! use fleetwork::fleet::maintenance::{ApprovalChain, MaintenanceRequest, Outcome};
//!
//! let chain = ApprovalChain::standard();
//! let request = MaintenanceRequest::new(
//!     VehicleId::new("B-1").unwrap(),
//!     300.0,
//!     "replace cabin lamps",
//! );
//! match chain.handle(&request) {
//!     Outcome::Approved { authority, .. } => assert_eq!(authority, "mechanic"),
//!     Outcome::Unhandled => unreachable!(),
//! }
//! ```

use crate::core::types::VehicleId;

/// A request to spend money on maintaining a vehicle.
///
/// Transient: requests flow through the chain and are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRequest {
    vehicle_id: VehicleId,
    cost: f64,
    description: String,
}

impl MaintenanceRequest {
    /// Create a request.
    pub fn new(vehicle_id: VehicleId, cost: f64, description: impl Into<String>) -> Self {
        Self {
            vehicle_id,
            cost,
            description: description.into(),
        }
    }

    /// The vehicle the work is for (reference, not ownership).
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// Estimated cost of the work.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// What the work is.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of running a request through a chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Some authority's band matched.
    Approved {
        /// Which authority approved.
        authority: &'static str,
        /// Human-readable approval line.
        message: String,
    },
    /// No authority's band matched (e.g. non-positive cost).
    Unhandled,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Approved { message, .. } => write!(f, "{}", message),
            Outcome::Unhandled => write!(f, "request not handled"),
        }
    }
}

/// An authority with a cost band.
///
/// Approvers are pure with respect to a request: same request, same
/// answer.
pub trait Approver {
    /// The authority's name, used in approval messages.
    fn title(&self) -> &'static str;

    /// Whether this authority's band covers the request's cost.
    fn covers(&self, cost: f64) -> bool;

    /// Approve the request if the band covers it.
    fn try_approve(&self, request: &MaintenanceRequest) -> Option<String> {
        if !self.covers(request.cost()) {
            return None;
        }
        Some(format!(
            "{} approved maintenance: {} ({:.2})",
            self.title(),
            request.description(),
            request.cost()
        ))
    }
}

/// Approves small jobs, up to 500.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mechanic;

impl Approver for Mechanic {
    fn title(&self) -> &'static str {
        "mechanic"
    }

    fn covers(&self, cost: f64) -> bool {
        cost > 0.0 && cost <= 500.0
    }
}

/// Approves mid-range jobs, over 500 up to 5000.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentHead;

impl Approver for DepartmentHead {
    fn title(&self) -> &'static str {
        "department head"
    }

    fn covers(&self, cost: f64) -> bool {
        cost > 500.0 && cost <= 5000.0
    }
}

/// Approves any positive cost not taken upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Director;

impl Approver for Director {
    fn title(&self) -> &'static str {
        "director"
    }

    fn covers(&self, cost: f64) -> bool {
        cost > 0.0
    }
}

/// An explicitly composed, ordered chain of approvers.
#[derive(Default)]
pub struct ApprovalChain {
    approvers: Vec<Box<dyn Approver>>,
}

impl ApprovalChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an approver to the end of the chain.
    pub fn then(mut self, approver: impl Approver + 'static) -> Self {
        self.approvers.push(Box::new(approver));
        self
    }

    /// The standard company chain: Mechanic → DepartmentHead → Director.
    pub fn standard() -> Self {
        Self::new().then(Mechanic).then(DepartmentHead).then(Director)
    }

    /// Number of approvers in the chain.
    pub fn len(&self) -> usize {
        self.approvers.len()
    }

    /// Whether the chain has no approvers.
    pub fn is_empty(&self) -> bool {
        self.approvers.is_empty()
    }

    /// Walk the chain in order; first matching band wins.
    pub fn handle(&self, request: &MaintenanceRequest) -> Outcome {
        for approver in &self.approvers {
            if let Some(message) = approver.try_approve(request) {
                return Outcome::Approved {
                    authority: approver.title(),
                    message,
                };
            }
        }
        Outcome::Unhandled
    }
}

impl std::fmt::Debug for ApprovalChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let titles: Vec<&str> = self.approvers.iter().map(|a| a.title()).collect();
        f.debug_struct("ApprovalChain").field("order", &titles).finish()
    }
}
