//! core
//!
//! Core domain types for Fleetwork.
//!
//! # Modules
//!
//! - [`types`] - Strong types: VehicleId, DriverId, VehicleStatus, Role
//! - [`vehicle`] - The vehicle model, its variants, and record encoding
//! - [`catalog`] - Variant registry and construct-by-name factory
//! - [`driver`] - Drivers and addresses
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Field invariants are enforced at construction and on every mutation
//! - Variant dispatch goes through the catalog, never through match arms
//!   in the facade or serializer

pub mod catalog;
pub mod config;
pub mod driver;
pub mod types;
pub mod vehicle;
