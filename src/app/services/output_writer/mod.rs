//! Output writing with codec fallback
//!
//! Serializes normalized rows to the configured output format and emits the
//! run summary. The preferred codec is modeled as a capability-checked
//! strategy: the coordinator attempts it and falls back to the delimited
//! writer on any reported failure, so the pipeline never fails solely
//! because the preferred codec is unavailable.
//!
//! ## Architecture
//!
//! - [`TabularWriter`] - Codec seam shared by all data-file writers
//! - [`columnar`] - Parquet implementation backed by polars
//! - [`delimited`] - CSV implementation, the always-available fallback
//! - [`summary`] - Run summary serialization

pub mod columnar;
pub mod delimited;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columnar::ColumnarWriter;
pub use delimited::DelimitedWriter;
pub use summary::write_run_summary;

use crate::app::models::report::RunSummary;
use crate::app::services::normalizer::Row;
use crate::config::PipelineConfig;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serializes rows into one tabular data file
///
/// Implementations report failure through `Result`; the coordinator treats
/// any preferred-codec failure as a capability miss and falls back rather
/// than rethrowing.
pub trait TabularWriter {
    /// Short format name, used in logs and the run summary
    fn format_name(&self) -> &'static str;

    /// File extension written by this codec
    fn extension(&self) -> &'static str;

    /// Write all rows to `path` in the fixed column order
    fn write(&self, path: &Path, rows: &[Row]) -> Result<()>;
}

/// Where the run's files landed
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    /// Data file path (extension reflects the codec that actually ran)
    pub data_path: PathBuf,

    /// Format actually written, which may differ from the requested one
    pub data_format: String,

    /// Run summary path
    pub summary_path: PathBuf,
}

/// Coordinates the preferred codec and the delimited fallback
pub struct OutputWriter {
    preferred: Option<Box<dyn TabularWriter>>,
    fallback: DelimitedWriter,
}

impl OutputWriter {
    /// Pick writers for the desired output format
    ///
    /// `parquet` selects the columnar codec with CSV fallback; any other
    /// value writes CSV directly.
    pub fn for_format(format: &str) -> Self {
        let preferred: Option<Box<dyn TabularWriter>> = match format {
            "parquet" => Some(Box::new(ColumnarWriter::new())),
            _ => None,
        };

        Self {
            preferred,
            fallback: DelimitedWriter::new(),
        }
    }

    /// Use a specific preferred codec (tests inject failing codecs here)
    pub fn with_preferred(preferred: Box<dyn TabularWriter>) -> Self {
        Self {
            preferred: Some(preferred),
            fallback: DelimitedWriter::new(),
        }
    }

    /// Write the data file and run summary, returning both paths
    ///
    /// The summary is always written, even for zero rows, and records the
    /// format that actually landed on disk.
    pub fn write_outputs(&self, config: &PipelineConfig, rows: &[Row]) -> Result<WriteOutcome> {
        create_dir_idempotent(&config.processed_dir)?;
        create_dir_idempotent(&config.reports_dir)?;

        let (data_path, data_format) =
            self.write_data(&config.processed_dir, &config.data_basename(), rows)?;

        let summary = RunSummary::new(
            config.name.as_str(),
            config.run_id.as_str(),
            &data_path,
            data_format.as_str(),
            rows,
        );
        let summary_path = config.run_summary_path();
        summary::write_run_summary(&summary_path, &summary)?;

        info!(
            "Wrote {} rows to '{}' ({})",
            rows.len(),
            data_path.display(),
            data_format
        );

        Ok(WriteOutcome {
            data_path,
            data_format,
            summary_path,
        })
    }

    /// Write the data file, falling back to the delimited codec on failure
    pub fn write_data(
        &self,
        dir: &Path,
        basename: &str,
        rows: &[Row],
    ) -> Result<(PathBuf, String)> {
        if let Some(preferred) = &self.preferred {
            let path = dir.join(format!("{}.{}", basename, preferred.extension()));
            match preferred.write(&path, rows) {
                Ok(()) => {
                    debug!("Wrote data file with {} codec", preferred.format_name());
                    return Ok((path, preferred.format_name().to_string()));
                }
                Err(e) => {
                    // Fallback is silent to the caller: logged, never raised
                    warn!(
                        "{} write failed ({}); falling back to {}",
                        preferred.format_name(),
                        e,
                        self.fallback.format_name()
                    );
                }
            }
        }

        let path = dir.join(format!("{}.{}", basename, self.fallback.extension()));
        self.fallback.write(&path, rows)?;
        Ok((path, self.fallback.format_name().to_string()))
    }
}

/// Create a directory tree; succeeding when it already exists
fn create_dir_idempotent(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory '{}'", dir.display()),
            e,
        )
    })
}
