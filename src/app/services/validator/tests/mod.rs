//! Test fixtures shared across validator tests

use crate::app::models::{Record, SourceFormat};
use crate::config::ValidationConfig;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;

// Test modules
mod rules_tests;

/// Thresholds used by the validator tests
pub fn create_test_config() -> ValidationConfig {
    ValidationConfig {
        allowed_sites: vec!["site-a".to_string(), "site-b".to_string()],
        temp_c_min: -40.0,
        temp_c_max: 50.0,
        humidity_min: 0.0,
        humidity_max: 100.0,
    }
}

/// CSV-sourced record; `temp_c = None` leaves the metric out entirely
pub fn csv_record(id: i64, site: &str, temp_c: Option<f64>) -> Record {
    let mut metrics = HashMap::new();
    if let Some(value) = temp_c {
        metrics.insert("temp_c".to_string(), value);
    }

    Record {
        id,
        timestamp: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
        site: site.to_string(),
        metrics,
        source_file: "data/raw/a.csv".to_string(),
        source_format: SourceFormat::Csv.as_str().to_string(),
    }
}

/// JSON-sourced record; `humidity = None` leaves the metric out entirely
pub fn json_record(id: i64, site: &str, humidity: Option<f64>) -> Record {
    let mut metrics = HashMap::new();
    if let Some(value) = humidity {
        metrics.insert("humidity".to_string(), value);
    }

    Record {
        id,
        timestamp: Utc.with_ymd_and_hms(2026, 2, 18, 10, 0, 0).unwrap(),
        site: site.to_string(),
        metrics,
        source_file: "data/raw/b.json".to_string(),
        source_format: SourceFormat::Json.as_str().to_string(),
    }
}
