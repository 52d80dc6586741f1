//! Fleetwork - a transport company fleet manager
//!
//! Fleetwork models a fleet-management domain: vehicles of several kinds,
//! drivers, an authorization-gated facade over their collections, a
//! multi-tier approval workflow for maintenance spending, and a
//! polymorphism-preserving snapshot format.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the fleet)
//! - [`fleet`] - The facade, authorization, costing, maintenance, persistence
//! - [`core`] - Domain types, the vehicle model, the variant catalog
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Fleetwork maintains the following invariants:
//!
//! 1. Field invariants hold at construction and after every mutation
//! 2. All collection mutations flow through the authorization-gated facade
//! 3. Variant dispatch goes through the catalog; adding a variant touches
//!    neither the facade nor the serializer
//! 4. Snapshots round-trip: a restored fleet equals the saved one

pub mod cli;
pub mod core;
pub mod fleet;
pub mod ui;
