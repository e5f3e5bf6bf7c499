//! Data models for the observation pipeline
//!
//! This module contains the canonical in-memory representation of one sensor
//! observation plus its provenance, together with the timestamp parsing rules
//! shared by every source reader.

pub mod report;

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Source Format
// =============================================================================

/// Source file formats the pipeline understands
///
/// Internal dispatch is an exhaustive match over this closed set. A record's
/// `source_format` field stays a raw string stamped by the reader, so a tag
/// that fails [`SourceFormat::from_tag`] is surfaced as a validation issue
/// instead of being unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Canonical lowercase tag for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
        }
    }

    /// Parse a raw format tag; `None` for anything outside the closed set
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Observation Record
// =============================================================================

/// One sensor observation with provenance, prior to validation
///
/// Created once by a source reader, never mutated, consumed by the validator
/// and (if valid) the normalizer. `metrics` holds one metric family per
/// source: CSV readers populate exactly `temp_c`, JSON readers exactly
/// `humidity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record identifier from the source file (not unique across files)
    pub id: i64,

    /// Observation instant; naive source timestamps are assumed UTC
    pub timestamp: DateTime<Utc>,

    /// Observation location identifier
    pub site: String,

    /// Metric name to numeric value
    pub metrics: HashMap<String, f64>,

    /// Path of the originating file, for traceability
    pub source_file: String,

    /// Raw format tag stamped by the reader ("csv" or "json")
    pub source_format: String,
}

impl Record {
    /// Look up a metric value by name
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

// =============================================================================
// Timestamp Parsing
// =============================================================================

/// Parse an ISO-8601 timestamp string into a UTC instant
///
/// Accepted forms:
/// - `2026-02-18T10:00:00Z` (trailing `Z` treated as `+00:00`)
/// - `2026-02-18T10:00:00+01:00` (any explicit offset)
/// - `2026-02-18T10:00:00` / `2026-02-18 10:00:00` (naive, assumed UTC)
///
/// Fractional seconds are accepted in all forms. Anything else fails with
/// [`Error::TimestampParsing`].
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    // Naive timestamps carry no offset; the pipeline treats them as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    Err(Error::timestamp_parsing(trimmed))
}
