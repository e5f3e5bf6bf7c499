//! Test fixtures shared across output writer tests

use crate::app::services::normalizer::Row;
use crate::app::services::output_writer::TabularWriter;
use crate::config::{OutputConfig, PipelineConfig, ValidationConfig};
use crate::{Error, Result};
use std::path::Path;

mod summary_tests;

/// Row as produced from a CSV-sourced record
pub fn csv_row(id: i64) -> Row {
    Row {
        id,
        timestamp: "2026-02-18T10:00:00+00:00".to_string(),
        site: "site-a".to_string(),
        temp_c: Some(21.5),
        humidity: None,
        source_file: "data/raw/a.csv".to_string(),
        source_format: "csv".to_string(),
    }
}

/// Row as produced from a JSON-sourced record
pub fn json_row(id: i64) -> Row {
    Row {
        id,
        timestamp: "2026-02-18T11:00:00+00:00".to_string(),
        site: "site-b".to_string(),
        temp_c: None,
        humidity: Some(55.5),
        source_file: "data/raw/b.json".to_string(),
        source_format: "json".to_string(),
    }
}

/// Minimal resolved configuration rooted in a temp directory
pub fn create_test_config(dir: &Path, format: &str) -> PipelineConfig {
    PipelineConfig {
        name: "sensors".to_string(),
        run_id: "run-1".to_string(),
        raw_dir: dir.join("raw"),
        processed_dir: dir.join("processed"),
        reports_dir: dir.join("reports"),
        csv_files: Vec::new(),
        json_files: Vec::new(),
        max_workers: 1,
        validation: ValidationConfig {
            allowed_sites: vec!["site-a".to_string(), "site-b".to_string()],
            temp_c_min: -40.0,
            temp_c_max: 50.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
        },
        output: OutputConfig {
            format: format.to_string(),
            basename: "observations".to_string(),
        },
    }
}

/// Codec that always reports failure, standing in for a missing capability
#[derive(Debug)]
pub struct FailingWriter;

impl TabularWriter for FailingWriter {
    fn format_name(&self) -> &'static str {
        "parquet"
    }

    fn extension(&self) -> &'static str {
        "parquet"
    }

    fn write(&self, _path: &Path, _rows: &[Row]) -> Result<()> {
        Err(Error::output_codec(
            "codec unavailable",
            Box::new(std::io::Error::other("forced failure")),
        ))
    }
}
