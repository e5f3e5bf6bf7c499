//! Sensor Observation Pipeline Library
//!
//! A Rust library for ingesting heterogeneous sensor-observation files
//! (CSV and JSON), validating each record against configurable domain rules,
//! and normalizing the survivors into a single tabular output.
//!
//! This library provides tools for:
//! - Parsing CSV and JSON observation files into a common record model
//! - Fanning file reads out across a bounded worker pool with deterministic
//!   merge order
//! - Accumulating per-record, per-field validation issues without dropping
//!   records silently
//! - Projecting valid records into a fixed flat row schema
//! - Writing Parquet output with a silent CSV fallback, plus JSON audit
//!   reports for every run

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod ingest;
        pub mod normalizer;
        pub mod output_writer;
        pub mod validator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Record, SourceFormat};
pub use config::PipelineConfig;

/// Result type alias for the observation pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pipeline operations
///
/// Parse and configuration errors are fatal and halt the run. Output codec
/// errors are recoverable: the output writer catches them and falls back to
/// the delimited format. Per-record validation failures are not errors at
/// all; they travel as [`app::models::report::ValidationIssue`] values and
/// only surface as [`Error::ValidationFailed`] once the report is written.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or missing configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// CSV source file could not be parsed
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON source file could not be parsed
    #[error("JSON parsing error in file '{file}': {message}")]
    JsonParsing {
        file: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Timestamp string is not a recognized ISO-8601 instant
    #[error("Timestamp parsing error: '{value}' is not a valid ISO-8601 instant")]
    TimestampParsing { value: String },

    /// Preferred output codec failed; caught by the writer, never fatal
    #[error("Output codec error: {message}")]
    OutputCodec {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Run finished with validation issues (reported, then fatal at exit)
    #[error("Validation failed with {issues} issue(s)")]
    ValidationFailed { issues: usize },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error from a simple message
    pub fn io_error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Io {
            message: message.clone(),
            source: std::io::Error::other(message),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a CSV parsing error attributed to a source file
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON parsing error attributed to a source file
    pub fn json_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::JsonParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a timestamp parsing error
    pub fn timestamp_parsing(value: impl Into<String>) -> Self {
        Self::TimestampParsing {
            value: value.into(),
        }
    }

    /// Create an output codec error
    pub fn output_codec(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::OutputCodec {
            message: message.into(),
            source,
        }
    }

    /// Create a validation failure from an accumulated issue count
    pub fn validation_failed(issues: usize) -> Self {
        Self::ValidationFailed { issues }
    }

    /// Source file the error is attributed to, if any
    pub fn source_file(&self) -> Option<&str> {
        match self {
            Self::CsvParsing { file, .. } | Self::JsonParsing { file, .. } => Some(file),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
