//! Data models for validation and run reporting
//!
//! This module contains the serializable payloads the pipeline emits as JSON
//! audit artifacts: the validation report written by the validator and the
//! run summary written by the output writer.

use crate::app::models::Record;
use crate::app::services::normalizer::Row;
use crate::constants::OUTPUT_COLUMNS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// Shared Report Fragments
// =============================================================================

/// Pipeline identity stamped on every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineIdent {
    pub name: String,
    pub run_id: String,
}

// =============================================================================
// Validation Report
// =============================================================================

/// One field-level validation failure tied to one record
///
/// Issues are immutable once created and are serialized verbatim into the
/// validation report, so `message` strings must stay deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub record_id: i64,
    pub source_file: String,
    pub source_format: String,
    /// Dotted field path, e.g. `metrics.temp_c`
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue carrying the record's provenance
    pub fn for_record(
        record: &Record,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record.id,
            source_file: record.source_file.clone(),
            source_format: record.source_format.clone(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Record counts for the validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCounts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Full validation report payload, written once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub pipeline: PipelineIdent,
    pub counts: ValidationCounts,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Assemble a report from validation results
    pub fn new(
        name: impl Into<String>,
        run_id: impl Into<String>,
        total: usize,
        valid: usize,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        Self {
            pipeline: PipelineIdent {
                name: name.into(),
                run_id: run_id.into(),
            },
            counts: ValidationCounts {
                total,
                valid,
                invalid: total - valid,
            },
            issues,
        }
    }
}

// =============================================================================
// Run Summary
// =============================================================================

/// Where the data file actually landed
///
/// `format` reflects the written extension, which may differ from the
/// requested format when the codec fallback fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputInfo {
    pub path: String,
    pub format: String,
}

/// Row counts for the run summary
///
/// `by_source_format` is an ordered map so the serialized summary is
/// byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub rows: usize,
    pub by_source_format: BTreeMap<String, usize>,
}

/// Run summary payload, written once per run even when zero rows were produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub pipeline: PipelineIdent,
    pub output: OutputInfo,
    pub counts: SummaryCounts,
    pub columns: Vec<String>,
}

impl RunSummary {
    /// Assemble a summary from the written data file and its rows
    pub fn new(
        name: impl Into<String>,
        run_id: impl Into<String>,
        data_path: &Path,
        format: impl Into<String>,
        rows: &[Row],
    ) -> Self {
        let mut by_source_format = BTreeMap::new();
        for row in rows {
            *by_source_format.entry(row.source_format.clone()).or_insert(0) += 1;
        }

        Self {
            pipeline: PipelineIdent {
                name: name.into(),
                run_id: run_id.into(),
            },
            output: OutputInfo {
                path: data_path.display().to_string(),
                format: format.into(),
            },
            counts: SummaryCounts {
                rows: rows.len(),
                by_source_format,
            },
            columns: OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}
