//! CSV source reader
//!
//! Maps delimited observation files onto the common record model. CSV
//! ingestion is strict: a missing column or an unparseable required field is
//! a fatal error for the whole file, attributed to it, rather than a
//! per-record validation issue.

use crate::app::models::{parse_timestamp, Record, SourceFormat};
use crate::constants::METRIC_TEMP_C;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Columns every observation CSV must carry
const REQUIRED_COLUMNS: &[&str] = &["id", "timestamp", "site", METRIC_TEMP_C];

/// Read one CSV observation file into records
///
/// The first row is treated as a header. `id` is parsed as an integer
/// identifier, `timestamp` as an instant, and `temp_c` as a float stored
/// under `metrics.temp_c`. `site` passes through verbatim, even when empty,
/// since the validator owns the site rules.
pub fn read_observations_csv(path: &Path) -> Result<Vec<Record>> {
    let file_name = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(&file_name, "failed to open file", Some(e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(&file_name, "failed to read header row", Some(e)))?;
    let columns = ColumnIndex::analyze(headers, &file_name)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let line = row + 2; // line 1 is the header
        let raw = result.map_err(|e| {
            Error::csv_parsing(&file_name, format!("malformed record at line {}", line), Some(e))
        })?;
        records.push(parse_record(&raw, &columns, &file_name, line)?);
    }

    debug!("Read {} records from '{}'", records.len(), file_name);
    Ok(records)
}

/// Header-name to column-index mapping for one file
#[derive(Debug)]
struct ColumnIndex {
    name_to_index: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the mapping and verify every required column is present
    fn analyze(headers: &StringRecord, file: &str) -> Result<Self> {
        let name_to_index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !name_to_index.contains_key(*column) {
                return Err(Error::csv_parsing(
                    file,
                    format!("missing required column '{}'", column),
                    None,
                ));
            }
        }

        Ok(Self { name_to_index })
    }

    /// Get a required field value from a record
    fn required_field<'a>(
        &self,
        record: &'a StringRecord,
        name: &str,
        file: &str,
        line: usize,
    ) -> Result<&'a str> {
        let index = self.name_to_index.get(name).ok_or_else(|| {
            Error::csv_parsing(file, format!("missing required column '{}'", name), None)
        })?;

        record.get(*index).ok_or_else(|| {
            Error::csv_parsing(
                file,
                format!("line {}: no value for required column '{}'", line, name),
                None,
            )
        })
    }
}

/// Parse a single data row into a record
fn parse_record(
    raw: &StringRecord,
    columns: &ColumnIndex,
    file: &str,
    line: usize,
) -> Result<Record> {
    let id = parse_required_i64(raw, columns, "id", file, line)?;

    let timestamp_text = columns.required_field(raw, "timestamp", file, line)?;
    let timestamp = parse_timestamp(timestamp_text)
        .map_err(|e| Error::csv_parsing(file, format!("line {}: {}", line, e), None))?;

    // Site passes through verbatim; the validator owns the non-empty and
    // allow-list rules.
    let site = columns.required_field(raw, "site", file, line)?.to_string();

    let temp_c = parse_required_f64(raw, columns, METRIC_TEMP_C, file, line)?;
    let mut metrics = HashMap::new();
    metrics.insert(METRIC_TEMP_C.to_string(), temp_c);

    Ok(Record {
        id,
        timestamp,
        site,
        metrics,
        source_file: file.to_string(),
        source_format: SourceFormat::Csv.as_str().to_string(),
    })
}

fn parse_required_i64(
    record: &StringRecord,
    columns: &ColumnIndex,
    name: &str,
    file: &str,
    line: usize,
) -> Result<i64> {
    let value = columns.required_field(record, name, file, line)?.trim();
    value.parse::<i64>().map_err(|e| {
        Error::csv_parsing(
            file,
            format!("line {}: invalid integer for '{}': '{}' ({})", line, name, value, e),
            None,
        )
    })
}

fn parse_required_f64(
    record: &StringRecord,
    columns: &ColumnIndex,
    name: &str,
    file: &str,
    line: usize,
) -> Result<f64> {
    let value = columns.required_field(record, name, file, line)?.trim();
    value.parse::<f64>().map_err(|e| {
        Error::csv_parsing(
            file,
            format!("line {}: invalid number for '{}': '{}' ({})", line, name, value, e),
            None,
        )
    })
}
