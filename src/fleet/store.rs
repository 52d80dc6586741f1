//! fleet::store
//!
//! Snapshot persistence for the whole fleet aggregate.
//!
//! # Storage Layout
//!
//! Snapshots live under a data directory (default `data/`):
//! - `transport_company.json` - the default snapshot file
//!
//! An explicit relative path is rewritten to live under the data
//! directory (only its file name is kept); an absolute path is used
//! as given. All snapshot path decisions go through [`snapshot_path`]
//! so no caller computes locations on its own.
//!
//! # Format
//!
//! One JSON document holding the fleet name, every vehicle as a tagged
//! record, and every driver with its assigned vehicle embedded as a
//! record (or `null`). Vehicle reconstruction dispatches through the
//! [`VehicleCatalog`], so the store never names a concrete variant.
//!
//! Saves and loads are single whole-aggregate operations; there are no
//! partial writes or incremental transactions.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::core::catalog::VehicleCatalog;
use crate::core::driver::{Address, Driver};
use crate::core::types::DriverId;
use crate::core::vehicle::{encode, Vehicle, VehicleError};

use super::{Fleet, FleetError};

/// Default directory holding fleet snapshots.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default snapshot file name under the data directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "transport_company.json";

/// Errors from snapshot storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No snapshot exists at the resolved path.
    #[error("snapshot not found: {path}")]
    NotFound { path: PathBuf },

    /// Reading or writing the snapshot file failed.
    #[error("snapshot i/o error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON.
    #[error("failed to parse snapshot '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// The document is JSON but not a usable snapshot.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// A vehicle record failed to decode.
    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    /// Restoring the aggregate failed (e.g. duplicate ids in the file).
    #[error(transparent)]
    Fleet(#[from] FleetError),
}

/// Resolve the snapshot path for a data directory.
///
/// - `None` → the default file under `data_dir`
/// - absolute path → used as given
/// - relative path → its file name, rewritten under `data_dir`
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use fleetwork::fleet::store::snapshot_path;
///
/// let dir = Path::new("data");
/// assert_eq!(
///     snapshot_path(dir, None),
///     Path::new("data/transport_company.json")
/// );
/// assert_eq!(
///     snapshot_path(dir, Some(Path::new("backup.json"))),
///     Path::new("data/backup.json")
/// );
/// assert_eq!(
///     snapshot_path(dir, Some(Path::new("/tmp/x.json"))),
///     Path::new("/tmp/x.json")
/// );
/// ```
pub fn snapshot_path(data_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        None => data_dir.join(DEFAULT_SNAPSHOT_FILE),
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => {
            let file_name = path
                .file_name()
                .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE), PathBuf::from);
            data_dir.join(file_name)
        }
    }
}

/// Serialize the whole aggregate to its snapshot file.
///
/// Creates the data directory if needed. Returns the path written.
pub fn save(fleet: &Fleet, data_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf, StoreError> {
    let path = snapshot_path(data_dir, explicit);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        }
    }

    let doc = fleet_to_value(fleet);
    let contents = serde_json::to_string_pretty(&doc).map_err(|e| StoreError::ParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&path, contents).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Restore a fleet from its snapshot file.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when no snapshot exists at the
/// resolved path — callers typically catch this and start a fresh fleet.
pub fn load(
    catalog: &VehicleCatalog,
    data_dir: &Path,
    explicit: Option<&Path>,
) -> Result<Fleet, StoreError> {
    let path = snapshot_path(data_dir, explicit);
    if !path.exists() {
        return Err(StoreError::NotFound { path });
    }
    let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&contents).map_err(|e| StoreError::ParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fleet_from_value(catalog, &doc)
}

/// Build the snapshot document for a fleet.
fn fleet_to_value(fleet: &Fleet) -> Value {
    let vehicles: Vec<Value> = fleet
        .vehicles()
        .map(|v| Value::Object(encode(v)))
        .collect();
    let drivers: Vec<Value> = fleet.drivers().map(|d| driver_to_value(fleet, d)).collect();
    json!({
        "name": fleet.name(),
        "vehicles": vehicles,
        "drivers": drivers,
    })
}

fn driver_to_value(fleet: &Fleet, driver: &Driver) -> Value {
    // A stale assignment (vehicle since removed) serializes as null;
    // the wire format embeds records, not ids, so a dangling reference
    // has no representation.
    let assigned = driver
        .assigned_vehicle()
        .and_then(|id| fleet.vehicle(id))
        .map_or(Value::Null, |v| Value::Object(encode(v)));
    json!({
        "name": driver.name(),
        "driver_id": driver.id().as_str(),
        "license_type": driver.license_type(),
        "address": {
            "city": driver.address().city,
            "street": driver.address().street,
            "house": driver.address().house,
        },
        "assigned_vehicle": assigned,
    })
}

fn fleet_from_value(catalog: &VehicleCatalog, doc: &Value) -> Result<Fleet, StoreError> {
    let obj = doc
        .as_object()
        .ok_or_else(|| StoreError::Malformed("snapshot is not an object".into()))?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed("missing string key 'name'".into()))?;

    let mut vehicles: Vec<Box<dyn Vehicle>> = Vec::new();
    for value in required_array(obj, "vehicles")? {
        let record = value
            .as_object()
            .ok_or_else(|| StoreError::Malformed("vehicle entry is not an object".into()))?;
        vehicles.push(catalog.decode(record)?);
    }

    let mut drivers: Vec<Driver> = Vec::new();
    for value in required_array(obj, "drivers")? {
        drivers.push(driver_from_value(catalog, value)?);
    }

    Ok(Fleet::restore(name, vehicles, drivers)?)
}

fn required_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, StoreError> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Malformed(format!("missing array key '{}'", key)))
}

fn driver_from_value(catalog: &VehicleCatalog, value: &Value) -> Result<Driver, StoreError> {
    let obj = value
        .as_object()
        .ok_or_else(|| StoreError::Malformed("driver entry is not an object".into()))?;
    let name = required_str(obj, "name")?;
    let id = DriverId::new(required_str(obj, "driver_id")?)
        .map_err(|e| StoreError::Malformed(e.to_string()))?;
    let license_type = required_str(obj, "license_type")?;
    let address: Address = obj
        .get("address")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| StoreError::Malformed(format!("bad driver address: {}", e)))?
        .ok_or_else(|| StoreError::Malformed("missing key 'address'".into()))?;

    let mut driver = Driver::new(name, id, license_type, address);
    match obj.get("assigned_vehicle") {
        None | Some(Value::Null) => {}
        Some(value) => {
            let record = value.as_object().ok_or_else(|| {
                StoreError::Malformed("'assigned_vehicle' is not an object".into())
            })?;
            // Decode the embedded record to validate it, then keep the
            // id: the link points into the fleet's vehicle store.
            let vehicle = catalog.decode(record)?;
            driver.assign_vehicle(vehicle.base().id().clone());
        }
    }
    Ok(driver)
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, StoreError> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed(format!("missing string key '{}'", key)))
}
