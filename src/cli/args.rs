//! Command-line argument definitions for the observation pipeline
//!
//! This module defines the CLI interface using the clap derive API. The
//! orchestration itself is thin plumbing: arguments only locate the
//! configuration document, name the run, and tune logging.

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_LOG_LEVEL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the observation pipeline
#[derive(Debug, Clone, Parser)]
#[command(
    name = "obs-pipeline",
    version,
    about = "Validate and normalize sensor observation files into tabular outputs",
    long_about = "A single-run batch pipeline that ingests configured CSV and JSON \
                  sensor-observation files, validates every record against domain \
                  rules, normalizes the survivors into one flat schema, and writes \
                  the result plus JSON audit reports. The run exits non-zero when \
                  any validation issue was found."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full ingest, validate, normalize, write pipeline
    Run(RunArgs),
    /// Ingest and validate only, printing issues without writing outputs
    Check(CheckArgs),
}

/// Arguments for the run command (full pipeline execution)
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Path to the pipeline TOML configuration
    ///
    /// Relative paths inside the document are resolved against the
    /// configuration file's directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE,
        help = "Path to the pipeline TOML configuration"
    )]
    pub config: PathBuf,

    /// Run identifier scoping all output paths
    ///
    /// Overrides `[pipeline].run_id` from the configuration file. Schedulers
    /// typically pass their execution timestamp here.
    #[arg(
        long = "run-id",
        value_name = "ID",
        help = "Run identifier (overrides [pipeline].run_id)"
    )]
    pub run_id: Option<String>,

    /// Tracing filter for console logging
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter, e.g. info, debug, or obs_pipeline=debug"
    )]
    pub log_level: String,
}

/// Arguments for the check command (dry validation)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Path to the pipeline TOML configuration
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE,
        help = "Path to the pipeline TOML configuration"
    )]
    pub config: PathBuf,

    /// Run identifier; only used for log context, nothing is written
    #[arg(
        long = "run-id",
        value_name = "ID",
        default_value = "check",
        help = "Run identifier (overrides [pipeline].run_id)"
    )]
    pub run_id: String,

    /// Tracing filter for console logging
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter, e.g. info, debug, or obs_pipeline=debug"
    )]
    pub log_level: String,
}
