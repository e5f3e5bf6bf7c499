//! Tests for run summary serialization

use super::{csv_row, json_row};
use crate::app::models::report::RunSummary;
use crate::app::services::output_writer::write_run_summary;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_summary_json_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run_summary_run-1.json");

    let rows = vec![csv_row(1), json_row(2), json_row(3)];
    let summary = RunSummary::new(
        "sensors",
        "run-1",
        Path::new("processed/observations_run-1.parquet"),
        "parquet",
        &rows,
    );
    write_run_summary(&path, &summary).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(value["pipeline"]["name"], "sensors");
    assert_eq!(value["pipeline"]["run_id"], "run-1");
    assert_eq!(value["output"]["format"], "parquet");
    assert_eq!(value["counts"]["rows"], 3);
    assert_eq!(value["counts"]["by_source_format"]["csv"], 1);
    assert_eq!(value["counts"]["by_source_format"]["json"], 2);
    assert_eq!(value["columns"].as_array().unwrap().len(), 7);
}

#[test]
fn test_summary_creates_nested_report_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports/nested/run_summary_run-1.json");

    let summary = RunSummary::new("sensors", "run-1", Path::new("out.csv"), "csv", &[]);
    write_run_summary(&path, &summary).unwrap();

    assert!(path.exists());
}

#[test]
fn test_summary_round_trips_through_serde() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run_summary_run-1.json");

    let summary = RunSummary::new("sensors", "run-1", Path::new("out.csv"), "csv", &[csv_row(1)]);
    write_run_summary(&path, &summary).unwrap();

    let read_back: RunSummary =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read_back, summary);
}
