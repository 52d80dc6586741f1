//! core::catalog
//!
//! The variant catalog: a registry mapping a type tag to a decode function
//! for a concrete vehicle variant.
//!
//! # Design
//!
//! This module provides the single source of truth for "what variants
//! exist". Both construct-by-name ([`build_vehicle`]) and record
//! deserialization ([`VehicleCatalog::decode`]) dispatch through it, so a
//! new variant only needs to register a tag and a decode function; the
//! facade and the serializer stay untouched.
//!
//! Registration happens once, at startup, in [`VehicleCatalog::builtin`].
//! The process-wide catalog behind [`VehicleCatalog::global`] is
//! initialized on first use and read-only afterwards, so it needs no
//! locking.
//!
//! # Example
//!
//! ```
//! use fleetwork::core::catalog::VehicleCatalog;
//!
//! let catalog = VehicleCatalog::global();
//! assert!(catalog.resolve("bus").is_some());
//! assert!(catalog.resolve("spaceship").is_none());
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::vehicle::{Bus, Taxi, Truck, Vehicle, VehicleError};

/// A decode function turning a tagged record into a concrete variant.
pub type DecodeFn = fn(&Map<String, Value>) -> Result<Box<dyn Vehicle>, VehicleError>;

static GLOBAL: OnceLock<VehicleCatalog> = OnceLock::new();

/// Registry of vehicle variants, keyed by lower-case type tag.
#[derive(Debug, Default)]
pub struct VehicleCatalog {
    decoders: HashMap<String, DecodeFn>,
}

impl VehicleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with all built-in variants registered.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(Bus::TAG, Bus::decode);
        catalog.register(Truck::TAG, Truck::decode);
        catalog.register(Taxi::TAG, Taxi::decode);
        catalog
    }

    /// The process-wide catalog, initialized once with the built-ins.
    pub fn global() -> &'static VehicleCatalog {
        GLOBAL.get_or_init(VehicleCatalog::builtin)
    }

    /// Register a decode function under a tag.
    ///
    /// Tags are stored lower-cased. Registration is idempotent per tag;
    /// the last registration wins.
    pub fn register(&mut self, tag: impl Into<String>, decode: DecodeFn) {
        self.decoders.insert(tag.into().to_lowercase(), decode);
    }

    /// Look up the decode function for a tag (case-insensitive).
    pub fn resolve(&self, tag: &str) -> Option<DecodeFn> {
        self.decoders.get(&tag.to_lowercase()).copied()
    }

    /// Known tags, sorted for deterministic output.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Decode a tagged record into a vehicle.
    ///
    /// Reads the `type` key, resolves it, and delegates field extraction
    /// to the variant's decode function.
    ///
    /// # Errors
    ///
    /// - [`VehicleError::MalformedRecord`] if `type` is missing
    /// - [`VehicleError::UnknownType`] if the tag is not registered
    /// - Field-validation failures from the variant, unchanged
    pub fn decode(&self, record: &Map<String, Value>) -> Result<Box<dyn Vehicle>, VehicleError> {
        let tag = record
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| VehicleError::MalformedRecord("missing string key 'type'".into()))?;
        let decode = self.resolve(tag).ok_or_else(|| {
            VehicleError::UnknownType(format!(
                "'{}', known types: {}",
                tag,
                self.tags().join(", ")
            ))
        })?;
        decode(record)
    }
}

/// Construct a vehicle by tag from a bag of fields.
///
/// This is the factory entry point used by construct-by-name callers (the
/// CLI, tests). It goes through the same decode functions as
/// deserialization, so factory and serializer can never disagree about a
/// variant's fields.
///
/// # Errors
///
/// Propagates [`VehicleError::UnknownType`] for unregistered tags and any
/// field-validation failure unchanged.
///
/// # Example
///
/// ```
/// use fleetwork::core::catalog::{build_vehicle, VehicleCatalog};
/// use fleetwork::core::vehicle::Vehicle;
/// use serde_json::{Map, Value};
///
/// let mut fields = Map::new();
/// fields.insert("vehicle_id".into(), Value::from("B-1"));
/// fields.insert("model".into(), Value::from("LiAZ-5292"));
/// fields.insert("year".into(), Value::from(2020));
/// fields.insert("capacity".into(), Value::from(110));
/// fields.insert("route_number".into(), Value::from("42"));
///
/// let bus = build_vehicle(VehicleCatalog::global(), "bus", fields).unwrap();
/// assert_eq!(bus.type_tag(), "bus");
/// ```
pub fn build_vehicle(
    catalog: &VehicleCatalog,
    tag: &str,
    mut fields: Map<String, Value>,
) -> Result<Box<dyn Vehicle>, VehicleError> {
    fields.insert("type".into(), Value::from(tag.to_lowercase()));
    catalog.decode(&fields)
}
