//! Plain record exchange format for models.
//!
//! A model is a JSON array of `{x, y, z, color}` objects with no ordering
//! guarantee and no metadata. Import is lenient: malformed records are
//! skipped and counted, valid records in the same batch still apply.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::Error;
use crate::core::types::{IVec3, Result};
use super::store::VoxelStore;
use super::voxel::{Color, Voxel};

/// One exported voxel
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: Color,
}

impl VoxelRecord {
    pub fn new(position: IVec3, color: Color) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            color,
        }
    }

    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<&Voxel> for VoxelRecord {
    fn from(voxel: &Voxel) -> Self {
        Self::new(voxel.position, voxel.color.clone())
    }
}

/// Outcome of a lenient import
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Records that created a voxel
    pub applied: usize,
    /// Malformed records that were ignored
    pub skipped: usize,
    /// Valid records whose cell was already occupied
    pub conflicts: usize,
}

/// Parse one coordinate: any finite JSON number, rounded to the nearest cell.
fn parse_coord(value: &Value, key: &str) -> Option<i32> {
    let n = value.get(key)?.as_f64()?;
    if !n.is_finite() {
        return None;
    }
    let rounded = n.round();
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return None;
    }
    Some(rounded as i32)
}

/// Parse a single record, returning None if it is malformed.
pub fn parse_record(value: &Value) -> Option<VoxelRecord> {
    let x = parse_coord(value, "x")?;
    let y = parse_coord(value, "y")?;
    let z = parse_coord(value, "z")?;
    let color = value.get("color")?.as_str()?;
    Some(VoxelRecord {
        x,
        y,
        z,
        color: Color::from(color),
    })
}

/// Parse a batch of records, returning the valid ones and the skip count.
pub fn parse_records(values: &[Value]) -> (Vec<VoxelRecord>, usize) {
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0;

    for (index, value) in values.iter().enumerate() {
        match parse_record(value) {
            Some(record) => records.push(record),
            None => {
                log::warn!("Skipping invalid voxel record #{}: {}", index, value);
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

/// Add records to the store. Returns `(applied, conflicts)`.
pub fn import_records(store: &mut VoxelStore, records: &[VoxelRecord]) -> (usize, usize) {
    let mut applied = 0;
    let mut conflicts = 0;
    for record in records {
        if store.add(record.position(), record.color.clone()).is_some() {
            applied += 1;
        } else {
            conflicts += 1;
        }
    }
    (applied, conflicts)
}

/// Validate and add a batch of raw JSON records to the store.
pub fn import_values(store: &mut VoxelStore, values: &[Value]) -> ImportReport {
    let (records, skipped) = parse_records(values);
    let (applied, conflicts) = import_records(store, &records);

    log::debug!(
        "Imported {} voxels ({} skipped, {} conflicts)",
        applied, skipped, conflicts
    );

    ImportReport {
        applied,
        skipped,
        conflicts,
    }
}

/// Export store content as records (unordered).
pub fn export_records(store: &VoxelStore) -> Vec<VoxelRecord> {
    store
        .iter()
        .map(|(position, color)| VoxelRecord::new(position, color.clone()))
        .collect()
}

/// Serialize records as a pretty JSON array.
pub fn to_json(records: &[VoxelRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a JSON document into raw records. The document must be an array;
/// the individual entries are validated later by `parse_records`.
pub fn from_json(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(values) => Ok(values),
        other => Err(Error::Parse(format!(
            "model must be a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write records to a model file, creating parent directories.
pub fn save_model(path: impl AsRef<Path>, records: &[VoxelRecord]) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(records)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, json)?;
    Ok(())
}

/// Read raw records from a model file.
pub fn load_model(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}
