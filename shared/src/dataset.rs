//! Reading and writing the static farm dataset file (a JSON array of records)

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::models::{FarmRecord, FARM_RECORD_FIELDS};
use crate::validation::validate_dataset;

/// Where the dashboard expects the generated file
pub const DEFAULT_DATASET_PATH: &str = "public/farmData.json";

/// Parse and validate a dataset held in memory
///
/// A record lacking a required key is an `InvalidInputShape` naming that key;
/// wrong types and unknown keys surface as `Serialization`.
pub fn load_dataset_from_str(json: &str) -> CoreResult<Vec<FarmRecord>> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    let farms = raw
        .into_iter()
        .map(|value| {
            check_required_fields(&value)?;
            Ok(serde_json::from_value::<FarmRecord>(value)?)
        })
        .collect::<CoreResult<Vec<_>>>()?;
    validate_dataset(&farms)?;
    Ok(farms)
}

fn check_required_fields(value: &Value) -> CoreResult<()> {
    let Some(record) = value.as_object() else {
        return Ok(());
    };
    let farm_id = record
        .get("farmId")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>");
    match FARM_RECORD_FIELDS.iter().find(|key| !record.contains_key(**key)) {
        Some(missing) => Err(CoreError::invalid(farm_id, *missing, "is missing")),
        None => Ok(()),
    }
}

/// Read, parse and validate the dataset file
pub fn load_dataset(path: impl AsRef<Path>) -> CoreResult<Vec<FarmRecord>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let farms = load_dataset_from_str(&raw)?;
    tracing::debug!(path = %path.display(), records = farms.len(), "Loaded farm dataset");
    Ok(farms)
}

/// Serialize the collection as one JSON array
pub fn dataset_to_string(farms: &[FarmRecord], pretty: bool) -> CoreResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(farms)?
    } else {
        serde_json::to_string(farms)?
    };
    Ok(json)
}

/// Write the collection to `path`, creating parent directories as needed
pub fn save_dataset(path: impl AsRef<Path>, farms: &[FarmRecord], pretty: bool) -> CoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, farms)?;
    } else {
        serde_json::to_writer(&mut writer, farms)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), records = farms.len(), "Wrote farm dataset");
    Ok(())
}
