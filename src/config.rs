//! Configuration management and validation.
//!
//! Loads the pipeline's TOML configuration document, resolves relative paths
//! against the configuration file's directory, and validates thresholds
//! before any I/O happens.

use crate::constants::{DEFAULT_MAX_WORKERS, RUN_SUMMARY_PREFIX, VALIDATION_REPORT_PREFIX};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

// =============================================================================
// Raw TOML Shape
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    pipeline: RawPipeline,
    paths: RawPaths,
    sources: RawSources,
    #[serde(default)]
    concurrency: RawConcurrency,
    validation: RawValidation,
    output: RawOutput,
}

#[derive(Debug, Deserialize)]
struct RawPipeline {
    name: String,
    run_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
    reports_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawSources {
    csv_files: Vec<PathBuf>,
    json_files: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawConcurrency {
    #[serde(default = "default_max_workers")]
    max_workers: usize,
}

impl Default for RawConcurrency {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

#[derive(Debug, Deserialize)]
struct RawValidation {
    allowed_sites: Vec<String>,
    temp_c_min: f64,
    temp_c_max: f64,
    humidity_min: f64,
    humidity_max: f64,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    format: String,
    basename: String,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Validation thresholds applied per record
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Sites accepted by the allow-list rule, in configured order
    pub allowed_sites: Vec<String>,

    /// Inclusive temperature range for CSV-sourced records
    pub temp_c_min: f64,
    pub temp_c_max: f64,

    /// Inclusive humidity range for JSON-sourced records
    pub humidity_min: f64,
    pub humidity_max: f64,
}

/// Output format and naming
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Desired data format, lowercased; anything other than "parquet" writes CSV
    pub format: String,

    /// Base filename for the data file (run id is appended)
    pub basename: String,
}

/// Fully resolved pipeline configuration
///
/// All paths are resolved against the configuration file's directory, the
/// worker count is concrete, and a run id is guaranteed to be present.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pipeline name stamped on every report
    pub name: String,

    /// Opaque token scoping all output paths for this execution
    pub run_id: String,

    /// Base directory for raw input files
    pub raw_dir: PathBuf,

    /// Directory receiving the processed data file
    pub processed_dir: PathBuf,

    /// Directory receiving validation report and run summary
    pub reports_dir: PathBuf,

    /// CSV source files in configured order
    pub csv_files: Vec<PathBuf>,

    /// JSON source files in configured order
    pub json_files: Vec<PathBuf>,

    /// Ingest worker count; 1 means fully sequential
    pub max_workers: usize,

    /// Per-record validation thresholds
    pub validation: ValidationConfig,

    /// Output format and naming
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Load and resolve configuration from a TOML file
    ///
    /// `run_id_override` (from the CLI) takes precedence over the value in
    /// the file; one of the two must be present. A `max_workers` of 0 in the
    /// file resolves to the logical CPU count.
    pub fn load(path: &Path, run_id_override: Option<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file '{}'", path.display()),
                e,
            )
        })?;

        let raw: RawConfig = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("invalid configuration '{}': {}", path.display(), e))
        })?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let run_id = run_id_override
            .or(raw.pipeline.run_id)
            .ok_or_else(|| Error::configuration("run_id missing: set [pipeline].run_id or pass --run-id"))?;

        let max_workers = if raw.concurrency.max_workers == 0 {
            num_cpus::get()
        } else {
            raw.concurrency.max_workers
        };

        let config = Self {
            name: raw.pipeline.name,
            run_id,
            raw_dir: resolve(&base_dir, raw.paths.raw_dir),
            processed_dir: resolve(&base_dir, raw.paths.processed_dir),
            reports_dir: resolve(&base_dir, raw.paths.reports_dir),
            csv_files: raw
                .sources
                .csv_files
                .into_iter()
                .map(|p| resolve(&base_dir, p))
                .collect(),
            json_files: raw
                .sources
                .json_files
                .into_iter()
                .map(|p| resolve(&base_dir, p))
                .collect(),
            max_workers,
            validation: ValidationConfig {
                allowed_sites: raw.validation.allowed_sites,
                temp_c_min: raw.validation.temp_c_min,
                temp_c_max: raw.validation.temp_c_max,
                humidity_min: raw.validation.humidity_min,
                humidity_max: raw.validation.humidity_max,
            },
            output: OutputConfig {
                format: raw.output.format.trim().to_lowercase(),
                basename: raw.output.basename,
            },
        };

        config.validate()?;
        debug!(
            "Loaded configuration: {} files, {} workers",
            config.csv_files.len() + config.json_files.len(),
            config.max_workers
        );
        Ok(config)
    }

    /// Validate resolved values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration("pipeline name must be non-empty"));
        }

        if self.run_id.trim().is_empty() {
            return Err(Error::configuration("run_id must be non-empty"));
        }

        if self.output.basename.trim().is_empty() {
            return Err(Error::configuration("output basename must be non-empty"));
        }

        if self.validation.temp_c_min > self.validation.temp_c_max {
            return Err(Error::configuration(format!(
                "temp_c_min {} must not exceed temp_c_max {}",
                self.validation.temp_c_min, self.validation.temp_c_max
            )));
        }

        if self.validation.humidity_min > self.validation.humidity_max {
            return Err(Error::configuration(format!(
                "humidity_min {} must not exceed humidity_max {}",
                self.validation.humidity_min, self.validation.humidity_max
            )));
        }

        Ok(())
    }

    /// Path of the validation report for this run
    pub fn validation_report_path(&self) -> PathBuf {
        self.reports_dir
            .join(format!("{}_{}.json", VALIDATION_REPORT_PREFIX, self.run_id))
    }

    /// Path of the run summary for this run
    pub fn run_summary_path(&self) -> PathBuf {
        self.reports_dir
            .join(format!("{}_{}.json", RUN_SUMMARY_PREFIX, self.run_id))
    }

    /// Run-id-scoped base filename for the data file (extension added by the writer)
    pub fn data_basename(&self) -> String {
        format!("{}_{}", self.output.basename, self.run_id)
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
