//! Delimited (CSV) codec, the always-available fallback
//!
//! Emits a header row matching the published column order, then one line per
//! row with no reordering. An absent metric becomes an empty field.

use super::TabularWriter;
use crate::app::services::normalizer::Row;
use crate::constants::OUTPUT_COLUMNS;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// CSV writer for normalized rows
#[derive(Debug, Default)]
pub struct DelimitedWriter;

impl DelimitedWriter {
    /// Create a new delimited writer
    pub fn new() -> Self {
        Self
    }
}

impl TabularWriter for DelimitedWriter {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, path: &Path, rows: &[Row]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            Error::io_error(format!(
                "failed to create data file '{}': {}",
                path.display(),
                e
            ))
        })?;

        writer.write_record(OUTPUT_COLUMNS).map_err(|e| {
            Error::io_error(format!(
                "failed to write header to '{}': {}",
                path.display(),
                e
            ))
        })?;

        for row in rows {
            writer
                .write_record(&[
                    row.id.to_string(),
                    row.timestamp.clone(),
                    row.site.clone(),
                    row.temp_c.map(|v| v.to_string()).unwrap_or_default(),
                    row.humidity.map(|v| v.to_string()).unwrap_or_default(),
                    row.source_file.clone(),
                    row.source_format.clone(),
                ])
                .map_err(|e| {
                    Error::io_error(format!(
                        "failed to write row to '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
        }

        writer.flush().map_err(|e| {
            Error::io(format!("failed to flush data file '{}'", path.display()), e)
        })?;

        debug!("Wrote csv data file: {}", path.display());
        Ok(())
    }
}
