//! Test fixtures shared across ingest tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

mod json_reader_tests;

/// Two-row CSV observation file content
pub const SAMPLE_CSV: &str = "\
id,timestamp,site,temp_c
1,2026-02-18T10:00:00Z,site-a,21.5
2,2026-02-18T11:00:00Z,site-b,19.0
";

/// Two-object JSON observation file content
pub const SAMPLE_JSON: &str = r#"[
  {"id": 3, "timestamp": "2026-02-18T10:30:00Z", "site": "site-a", "humidity": 55.0},
  {"id": 4, "timestamp": "2026-02-18T11:30:00Z", "site": "site-b", "humidity": 61.5}
]"#;

/// Helper to place a source file with given content in a temp directory
pub fn write_source_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}
