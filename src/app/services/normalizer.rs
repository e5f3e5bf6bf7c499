//! Schema normalizer
//!
//! Projects valid records into the fixed flat row schema consumed by the
//! output writer. Pure and total: invalid input has already been excluded
//! upstream, so there is no failure mode here.

use crate::app::models::Record;
use crate::constants::{METRIC_HUMIDITY, METRIC_TEMP_C};
use serde::{Deserialize, Serialize};

/// Flat output projection of one valid record
///
/// Field order matches [`crate::constants::OUTPUT_COLUMNS`], the published
/// column contract. The metric not supplied by the record's source stays
/// `None`: an explicit absent value, never the string "null".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: i64,

    /// RFC 3339 rendering of the observation instant
    pub timestamp: String,

    pub site: String,
    pub temp_c: Option<f64>,
    pub humidity: Option<f64>,
    pub source_file: String,
    pub source_format: String,
}

impl Row {
    /// Project one valid record into the output schema
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp.to_rfc3339(),
            site: record.site.clone(),
            temp_c: record.metric(METRIC_TEMP_C),
            humidity: record.metric(METRIC_HUMIDITY),
            source_file: record.source_file.clone(),
            source_format: record.source_format.clone(),
        }
    }
}

/// Project valid records into rows, preserving order
pub fn normalize_records(records: &[Record]) -> Vec<Row> {
    records.iter().map(Row::from_record).collect()
}
