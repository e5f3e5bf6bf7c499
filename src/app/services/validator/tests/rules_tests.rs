//! Tests for individual validation rules and their message text

use super::{create_test_config, csv_record, json_record};
use crate::app::services::validator::rules;

#[test]
fn test_positive_id_passes() {
    let mut issues = Vec::new();
    rules::check_id(&csv_record(1, "site-a", Some(20.0)), &mut issues);
    assert!(issues.is_empty());
}

#[test]
fn test_non_positive_id_is_flagged() {
    for id in [0, -5] {
        let mut issues = Vec::new();
        rules::check_id(&csv_record(id, "site-a", Some(20.0)), &mut issues);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "id");
        assert_eq!(issues[0].message, "must be > 0");
    }
}

#[test]
fn test_allowed_site_passes() {
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_site(
        &csv_record(1, "site-b", Some(20.0)),
        &config.allowed_sites,
        &mut issues,
    );
    assert!(issues.is_empty());
}

#[test]
fn test_empty_site_is_flagged() {
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_site(&csv_record(1, "", Some(20.0)), &config.allowed_sites, &mut issues);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "site");
    assert_eq!(issues[0].message, "must be non-empty");
}

#[test]
fn test_unknown_site_is_flagged_with_allow_list() {
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_site(
        &csv_record(1, "site-z", Some(20.0)),
        &config.allowed_sites,
        &mut issues,
    );

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "site");
    assert_eq!(issues[0].message, "must be one of [site-a, site-b]");
}

#[test]
fn test_site_rules_are_mutually_exclusive() {
    // An empty site gets exactly one site issue, never two
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_site(&csv_record(1, "", Some(20.0)), &config.allowed_sites, &mut issues);

    assert_eq!(issues.len(), 1);
}

#[test]
fn test_temperature_range_is_inclusive() {
    let config = create_test_config();

    for boundary in [-40.0, 50.0] {
        let mut issues = Vec::new();
        rules::check_metrics(&csv_record(1, "site-a", Some(boundary)), &config, &mut issues);
        assert!(issues.is_empty(), "boundary {} should pass", boundary);
    }
}

#[test]
fn test_out_of_range_temperature_is_flagged() {
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_metrics(&csv_record(1, "site-a", Some(150.0)), &config, &mut issues);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "metrics.temp_c");
    assert_eq!(issues[0].message, "must be between -40 and 50");
}

#[test]
fn test_missing_temperature_is_required() {
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_metrics(&csv_record(1, "site-a", None), &config, &mut issues);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "metrics.temp_c");
    assert_eq!(issues[0].message, "is required");
}

#[test]
fn test_humidity_checked_for_json_records() {
    let config = create_test_config();

    let mut issues = Vec::new();
    rules::check_metrics(&json_record(1, "site-a", Some(55.0)), &config, &mut issues);
    assert!(issues.is_empty());

    let mut issues = Vec::new();
    rules::check_metrics(&json_record(1, "site-a", Some(120.0)), &config, &mut issues);
    assert_eq!(issues[0].field, "metrics.humidity");
    assert_eq!(issues[0].message, "must be between 0 and 100");

    let mut issues = Vec::new();
    rules::check_metrics(&json_record(1, "site-a", None), &config, &mut issues);
    assert_eq!(issues[0].message, "is required");
}

#[test]
fn test_json_records_are_not_temperature_checked() {
    // A JSON record never carries temp_c; dispatch must pick humidity only
    let config = create_test_config();
    let mut issues = Vec::new();
    rules::check_metrics(&json_record(1, "site-a", Some(55.0)), &config, &mut issues);

    assert!(issues.iter().all(|i| i.field != "metrics.temp_c"));
}

#[test]
fn test_unknown_source_format_is_flagged() {
    let config = create_test_config();
    let mut record = csv_record(1, "site-a", Some(20.0));
    record.source_format = "xml".to_string();

    let mut issues = Vec::new();
    rules::check_metrics(&record, &config, &mut issues);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "source_format");
    assert_eq!(issues[0].message, "unknown source_format");
}
