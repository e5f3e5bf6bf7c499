//! Ingest coordination for observation source files
//!
//! This module fans file reads out across a bounded worker pool and merges
//! the results in a deterministic order: CSV files in configured order, then
//! JSON files in configured order, preserving row order within each file.
//!
//! ## Architecture
//!
//! - [`csv_reader`] - Strict CSV parsing into records
//! - [`json_reader`] - JSON list parsing into records
//! - [`IngestCoordinator`] - Sequential or bounded-parallel fan-out with an
//!   order-preserving merge
//!
//! Parallelism affects wall-clock time only, never output order: worker
//! results land in per-file slots indexed by original list position and are
//! flattened in order afterwards.

pub mod csv_reader;
pub mod json_reader;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use csv_reader::read_observations_csv;
pub use json_reader::read_observations_json;

use crate::app::models::{Record, SourceFormat};
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

/// Statistics from one ingest pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Number of source files read
    pub files_read: usize,

    /// Records contributed by CSV sources
    pub csv_records: usize,

    /// Records contributed by JSON sources
    pub json_records: usize,
}

impl IngestStats {
    /// Total records across all source formats
    pub fn total_records(&self) -> usize {
        self.csv_records + self.json_records
    }
}

/// Merged records plus ingest statistics
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// All records in deterministic source order
    pub records: Vec<Record>,

    /// Counters aggregated across files
    pub stats: IngestStats,
}

/// Fans out file reads and merges results deterministically
#[derive(Debug)]
pub struct IngestCoordinator {
    max_workers: usize,
}

impl IngestCoordinator {
    /// Create a coordinator with the configured worker bound
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Read every configured source file and merge the records
    ///
    /// Any single file failure aborts the whole ingest with the failing file
    /// attributable from the error; no partial results are returned.
    /// In-flight sibling reads are not cancelled, but their results are
    /// discarded once a failure has been retrieved.
    pub async fn ingest(
        &self,
        csv_files: &[PathBuf],
        json_files: &[PathBuf],
    ) -> Result<IngestResult> {
        let sources: Vec<(SourceFormat, PathBuf)> = csv_files
            .iter()
            .map(|path| (SourceFormat::Csv, path.clone()))
            .chain(json_files.iter().map(|path| (SourceFormat::Json, path.clone())))
            .collect();

        info!(
            "Ingesting {} source files with {} worker(s)",
            sources.len(),
            self.max_workers
        );

        let per_file = if self.max_workers <= 1 {
            read_sequential(&sources)?
        } else {
            read_parallel(&sources, self.max_workers).await?
        };

        let mut stats = IngestStats {
            files_read: sources.len(),
            ..Default::default()
        };
        let mut records = Vec::new();
        for ((format, _), file_records) in sources.iter().zip(per_file) {
            match format {
                SourceFormat::Csv => stats.csv_records += file_records.len(),
                SourceFormat::Json => stats.json_records += file_records.len(),
            }
            records.extend(file_records);
        }

        debug!(
            "Ingest complete: {} records from {} files",
            records.len(),
            stats.files_read
        );
        Ok(IngestResult { records, stats })
    }
}

/// Read one source file with the reader matching its format
pub fn read_source(format: SourceFormat, path: &Path) -> Result<Vec<Record>> {
    match format {
        SourceFormat::Csv => csv_reader::read_observations_csv(path),
        SourceFormat::Json => json_reader::read_observations_json(path),
    }
}

fn read_sequential(sources: &[(SourceFormat, PathBuf)]) -> Result<Vec<Vec<Record>>> {
    sources
        .iter()
        .map(|(format, path)| read_source(*format, path))
        .collect()
}

async fn read_parallel(
    sources: &[(SourceFormat, PathBuf)],
    max_workers: usize,
) -> Result<Vec<Vec<Record>>> {
    // Per-file result slots indexed by original list position, so completion
    // order never leaks into output order.
    let mut slots: Vec<Option<Vec<Record>>> = Vec::with_capacity(sources.len());
    slots.resize_with(sources.len(), || None);

    let mut reads = stream::iter(sources.to_vec().into_iter().enumerate())
        .map(|(index, (format, path))| async move {
            let joined = task::spawn_blocking(move || read_source(format, &path)).await;
            (index, joined)
        })
        .buffer_unordered(max_workers);

    while let Some((index, joined)) = reads.next().await {
        let file_records =
            joined.map_err(|e| Error::io_error(format!("ingest worker failed: {}", e)))??;
        slots[index] = Some(file_records);
    }

    Ok(slots
        .into_iter()
        .map(|slot| slot.unwrap_or_default())
        .collect())
}
