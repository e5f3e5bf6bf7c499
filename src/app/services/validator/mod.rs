//! Record validation engine
//!
//! Applies common and source-specific rules to every ingested record,
//! partitioning the input into valid records and typed issues. Every record
//! ends up in exactly one bucket: included in the valid set, or described by
//! at least one issue and excluded. Nothing is dropped silently.
//!
//! Rules are evaluated without short-circuit, so one record can accumulate
//! several issues in a single pass. Issues are collected, never thrown; the
//! run only fails afterwards, once the report is on disk.

pub mod rules;

#[cfg(test)]
pub mod tests;

use crate::app::models::report::{ValidationIssue, ValidationReport};
use crate::app::models::Record;
use crate::config::ValidationConfig;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Exhaustive partition of the input records
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Number of records examined
    pub total: usize,

    /// Records that accumulated zero issues, in input order
    pub valid: Vec<Record>,

    /// Every issue found, in input order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// Number of records rejected
    pub fn invalid(&self) -> usize {
        self.total - self.valid.len()
    }

    /// True when no record accumulated any issue
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Applies the configured rule set to record batches
#[derive(Debug)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with the configured thresholds
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Partition records into valid records and issues
    pub fn validate(&self, records: Vec<Record>) -> ValidationOutcome {
        let total = records.len();
        let mut valid = Vec::with_capacity(total);
        let mut issues = Vec::new();

        for record in records {
            let record_issues = self.check_record(&record);
            if record_issues.is_empty() {
                valid.push(record);
            } else {
                issues.extend(record_issues);
            }
        }

        info!(
            "Validated {} records: {} valid, {} invalid, {} issue(s)",
            total,
            valid.len(),
            total - valid.len(),
            issues.len()
        );

        ValidationOutcome {
            total,
            valid,
            issues,
        }
    }

    /// Evaluate every rule against one record
    fn check_record(&self, record: &Record) -> Vec<ValidationIssue> {
        let mut found = Vec::new();
        rules::check_id(record, &mut found);
        rules::check_site(record, &self.config.allowed_sites, &mut found);
        rules::check_metrics(record, &self.config, &mut found);
        found
    }
}

/// Serialize a validation report to disk, creating parent directories
///
/// The report is always written, issues or not; it is the audit trail the
/// run's exit status points at.
pub fn write_validation_report(path: &Path, report: &ValidationReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create report directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let payload = serde_json::to_string_pretty(report)
        .map_err(|e| Error::io_error(format!("Failed to serialize validation report: {}", e)))?;

    std::fs::write(path, payload).map_err(|e| {
        Error::io(
            format!("Failed to write validation report '{}'", path.display()),
            e,
        )
    })?;

    debug!("Wrote validation report: {}", path.display());
    Ok(())
}
