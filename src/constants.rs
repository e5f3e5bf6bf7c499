//! Application constants for the observation pipeline
//!
//! This module contains the published output schema, metric names, and
//! default values used throughout the pipeline.

// =============================================================================
// Output Schema
// =============================================================================

/// Fixed column order of the normalized output.
///
/// This order is a published contract consumed by the output writer and the
/// run summary; changing it is a breaking change for downstream consumers.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "id",
    "timestamp",
    "site",
    "temp_c",
    "humidity",
    "source_file",
    "source_format",
];

// =============================================================================
// Metric Names
// =============================================================================

/// Metric contributed by CSV sources
pub const METRIC_TEMP_C: &str = "temp_c";

/// Metric contributed by JSON sources
pub const METRIC_HUMIDITY: &str = "humidity";

// =============================================================================
// Defaults
// =============================================================================

/// Default worker count for ingest (1 = fully sequential)
pub const DEFAULT_MAX_WORKERS: usize = 1;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "pipeline.toml";

/// Default log level for the CLI
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Report Files
// =============================================================================

/// Validation report file prefix (run id is appended)
pub const VALIDATION_REPORT_PREFIX: &str = "validation_report";

/// Run summary file prefix (run id is appended)
pub const RUN_SUMMARY_PREFIX: &str = "run_summary";
