//! Tests for the lenient JSON source reader

use super::{write_source_file, SAMPLE_JSON};
use crate::app::services::ingest::json_reader::read_observations_json;
use crate::Error;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

#[test]
fn test_parses_records_with_field_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(&dir, "b.json", SAMPLE_JSON);

    let records = read_observations_json(&path).unwrap();

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.id, 3);
    assert_eq!(
        first.timestamp,
        Utc.with_ymd_and_hms(2026, 2, 18, 10, 30, 0).unwrap()
    );
    assert_eq!(first.site, "site-a");
    assert_eq!(first.metric("humidity"), Some(55.0));
    assert_eq!(first.source_format, "json");
    assert_eq!(first.source_file, path.display().to_string());
}

#[test]
fn test_populates_exactly_the_humidity_metric() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(&dir, "b.json", SAMPLE_JSON);

    let records = read_observations_json(&path).unwrap();

    for record in &records {
        assert_eq!(record.metrics.len(), 1);
        assert!(record.metric("temp_c").is_none());
    }
}

#[test]
fn test_missing_humidity_key_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(
        &dir,
        "no_humidity.json",
        r#"[{"id": 5, "timestamp": "2026-02-18T10:00:00Z", "site": "site-a"}]"#,
    );

    // The record is produced without the metric; the validator reports it
    let records = read_observations_json(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].metrics.is_empty());
}

#[test]
fn test_null_humidity_is_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(
        &dir,
        "null_humidity.json",
        r#"[{"id": 5, "timestamp": "2026-02-18T10:00:00Z", "site": "site-a", "humidity": null}]"#,
    );

    let records = read_observations_json(&path).unwrap();
    assert!(records[0].metric("humidity").is_none());
}

#[test]
fn test_empty_list_yields_no_records() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(&dir, "empty.json", "[]");

    let records = read_observations_json(&path).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_non_list_top_level_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(
        &dir,
        "object.json",
        r#"{"id": 5, "timestamp": "2026-02-18T10:00:00Z", "site": "site-a"}"#,
    );

    let error = read_observations_json(&path).unwrap_err();
    assert!(matches!(error, Error::JsonParsing { .. }));
    assert!(error
        .to_string()
        .contains("expected a JSON list of objects, got an object"));
    assert_eq!(error.source_file(), Some(path.display().to_string().as_str()));
}

#[test]
fn test_malformed_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(&dir, "broken.json", "[{\"id\": 5,");

    let error = read_observations_json(&path).unwrap_err();
    assert!(matches!(error, Error::JsonParsing { .. }));
}

#[test]
fn test_object_missing_required_key_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(
        &dir,
        "no_site.json",
        r#"[{"id": 5, "timestamp": "2026-02-18T10:00:00Z", "humidity": 40.0}]"#,
    );

    let error = read_observations_json(&path).unwrap_err();
    assert!(matches!(error, Error::JsonParsing { .. }));
    assert!(error.to_string().contains("index 0"));
}

#[test]
fn test_unparseable_timestamp_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_source_file(
        &dir,
        "bad_ts.json",
        r#"[{"id": 5, "timestamp": "yesterday", "site": "site-a", "humidity": 40.0}]"#,
    );

    let error = read_observations_json(&path).unwrap_err();
    assert!(matches!(error, Error::JsonParsing { .. }));
}
