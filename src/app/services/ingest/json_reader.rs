//! JSON source reader
//!
//! Maps JSON observation files onto the common record model. The top-level
//! value must be a list of objects; anything else is a fatal error for the
//! file. Unlike the CSV reader, a missing `humidity` key is tolerated here:
//! the record is produced without the metric and the validator reports it.

use crate::app::models::{parse_timestamp, Record, SourceFormat};
use crate::constants::METRIC_HUMIDITY;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Raw object shape expected for each list element
#[derive(Debug, Deserialize)]
struct RawObservation {
    id: i64,
    timestamp: String,
    site: String,
    humidity: Option<f64>,
}

/// Read one JSON observation file into records
pub fn read_observations_json(path: &Path) -> Result<Vec<Record>> {
    let file_name = path.display().to_string();

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read source file '{}'", file_name), e))?;

    let document: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| Error::json_parsing(&file_name, "malformed JSON document", Some(e)))?;

    let items = document.as_array().ok_or_else(|| {
        Error::json_parsing(
            &file_name,
            format!("expected a JSON list of objects, got {}", value_kind(&document)),
            None,
        )
    })?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let raw: RawObservation = serde_json::from_value(item.clone()).map_err(|e| {
            Error::json_parsing(&file_name, format!("invalid object at index {}", index), Some(e))
        })?;

        let timestamp = parse_timestamp(&raw.timestamp).map_err(|e| {
            Error::json_parsing(&file_name, format!("object at index {}: {}", index, e), None)
        })?;

        let mut metrics = HashMap::new();
        if let Some(humidity) = raw.humidity {
            metrics.insert(METRIC_HUMIDITY.to_string(), humidity);
        }

        records.push(Record {
            id: raw.id,
            timestamp,
            site: raw.site,
            metrics,
            source_file: file_name.clone(),
            source_format: SourceFormat::Json.as_str().to_string(),
        });
    }

    debug!("Read {} records from '{}'", records.len(), file_name);
    Ok(records)
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
