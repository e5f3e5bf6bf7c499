//! Individual validation rules
//!
//! Issue messages are stable, deterministic text: they are serialized
//! verbatim into the validation report and compared against golden files in
//! tests. Changing a message is a breaking change for report consumers.

use crate::app::models::report::ValidationIssue;
use crate::app::models::{Record, SourceFormat};
use crate::config::ValidationConfig;
use crate::constants::{METRIC_HUMIDITY, METRIC_TEMP_C};

/// Identifiers must be positive
pub fn check_id(record: &Record, issues: &mut Vec<ValidationIssue>) {
    if record.id <= 0 {
        issues.push(ValidationIssue::for_record(record, "id", "must be > 0"));
    }
}

/// Site must be non-empty and on the allow-list
///
/// The two site rules are mutually exclusive: an empty site never also
/// reports an allow-list issue.
pub fn check_site(record: &Record, allowed_sites: &[String], issues: &mut Vec<ValidationIssue>) {
    if record.site.is_empty() {
        issues.push(ValidationIssue::for_record(record, "site", "must be non-empty"));
    } else if !allowed_sites.iter().any(|site| site == &record.site) {
        issues.push(ValidationIssue::for_record(
            record,
            "site",
            format!("must be one of [{}]", allowed_sites.join(", ")),
        ));
    }
}

/// Metric range check dispatched by source format
///
/// Dispatch is an exhaustive match over the closed format set. A tag outside
/// it is reported as an issue on `source_format`: reader output is treated as
/// loosely-typed external input even though internal logic is closed-variant.
pub fn check_metrics(
    record: &Record,
    config: &ValidationConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    match SourceFormat::from_tag(&record.source_format) {
        Some(SourceFormat::Csv) => check_range(
            record,
            METRIC_TEMP_C,
            config.temp_c_min,
            config.temp_c_max,
            issues,
        ),
        Some(SourceFormat::Json) => check_range(
            record,
            METRIC_HUMIDITY,
            config.humidity_min,
            config.humidity_max,
            issues,
        ),
        None => issues.push(ValidationIssue::for_record(
            record,
            "source_format",
            "unknown source_format",
        )),
    }
}

/// Inclusive range check on one metric; a missing key is its own issue
fn check_range(
    record: &Record,
    key: &str,
    min: f64,
    max: f64,
    issues: &mut Vec<ValidationIssue>,
) {
    let field = format!("metrics.{}", key);
    match record.metric(key) {
        None => issues.push(ValidationIssue::for_record(record, field, "is required")),
        Some(value) if value < min || value > max => {
            issues.push(ValidationIssue::for_record(
                record,
                field,
                format!("must be between {} and {}", min, max),
            ));
        }
        Some(_) => {}
    }
}
