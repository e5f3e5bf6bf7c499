//! Columnar (Parquet) codec backed by polars
//!
//! Builds a single in-memory frame in the fixed column order and writes it
//! with Snappy compression. Every failure is reported as
//! [`Error::OutputCodec`] so the coordinator can fall back.

use super::TabularWriter;
use crate::app::services::normalizer::Row;
use crate::{Error, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Parquet writer for normalized rows
#[derive(Debug, Default)]
pub struct ColumnarWriter;

impl ColumnarWriter {
    /// Create a new columnar writer
    pub fn new() -> Self {
        Self
    }

    /// Assemble rows into a frame with the published column order
    fn build_frame(rows: &[Row]) -> PolarsResult<DataFrame> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let timestamps: Vec<&str> = rows.iter().map(|r| r.timestamp.as_str()).collect();
        let sites: Vec<&str> = rows.iter().map(|r| r.site.as_str()).collect();
        let temps: Vec<Option<f64>> = rows.iter().map(|r| r.temp_c).collect();
        let humidities: Vec<Option<f64>> = rows.iter().map(|r| r.humidity).collect();
        let source_files: Vec<&str> = rows.iter().map(|r| r.source_file.as_str()).collect();
        let source_formats: Vec<&str> = rows.iter().map(|r| r.source_format.as_str()).collect();

        DataFrame::new(vec![
            Column::new("id".into(), ids),
            Column::new("timestamp".into(), timestamps),
            Column::new("site".into(), sites),
            Column::new("temp_c".into(), temps),
            Column::new("humidity".into(), humidities),
            Column::new("source_file".into(), source_files),
            Column::new("source_format".into(), source_formats),
        ])
    }
}

impl TabularWriter for ColumnarWriter {
    fn format_name(&self) -> &'static str {
        "parquet"
    }

    fn extension(&self) -> &'static str {
        "parquet"
    }

    fn write(&self, path: &Path, rows: &[Row]) -> Result<()> {
        let mut frame = Self::build_frame(rows)
            .map_err(|e| Error::output_codec("failed to assemble columnar frame", Box::new(e)))?;

        let file = File::create(path).map_err(|e| {
            Error::output_codec(
                format!("failed to create data file '{}'", path.display()),
                Box::new(e),
            )
        })?;

        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut frame)
            .map_err(|e| Error::output_codec("parquet serialization failed", Box::new(e)))?;

        debug!("Wrote parquet data file: {}", path.display());
        Ok(())
    }
}
