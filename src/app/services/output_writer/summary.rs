//! Run summary serialization
//!
//! The summary is the run's machine-readable receipt: where the data landed,
//! in which format, and how many rows came from each source family. It is
//! written on every run, including empty ones.

use crate::app::models::report::RunSummary;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Serialize a run summary to disk, creating parent directories
pub fn write_run_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create report directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let payload = serde_json::to_string_pretty(summary)
        .map_err(|e| Error::io_error(format!("Failed to serialize run summary: {}", e)))?;

    std::fs::write(path, payload).map_err(|e| {
        Error::io(
            format!("Failed to write run summary '{}'", path.display()),
            e,
        )
    })?;

    debug!("Wrote run summary: {}", path.display());
    Ok(())
}
