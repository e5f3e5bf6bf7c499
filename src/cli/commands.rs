//! Command implementations for the observation pipeline CLI
//!
//! This module wires the four pipeline stages together and handles console
//! reporting. Each stage returns a structured result (counts, paths,
//! warnings) that is aggregated here, so the exit status can be decided
//! after every report is on disk.

use crate::app::models::report::ValidationReport;
use crate::app::services::ingest::{IngestCoordinator, IngestResult, IngestStats};
use crate::app::services::normalizer;
use crate::app::services::output_writer::{OutputWriter, WriteOutcome};
use crate::app::services::validator::{write_validation_report, ValidationOutcome, Validator};
use crate::cli::args::{Args, CheckArgs, Commands, RunArgs};
use crate::config::PipelineConfig;
use crate::{Error, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Maximum issues echoed to the console; the report holds the full list
const MAX_CONSOLE_ISSUES: usize = 10;

/// Everything a completed `run` invocation produced
#[derive(Debug)]
pub struct RunReport {
    /// Ingest stage counters
    pub ingest: IngestStats,

    /// Validation report payload, as written to disk
    pub validation: ValidationReport,

    /// Where the validation report was written
    pub report_path: PathBuf,

    /// Write stage outcome; `None` when validation issues skipped it
    pub write: Option<WriteOutcome>,

    /// Wall-clock time for the whole run
    pub elapsed_ms: u128,
}

/// Main command dispatcher
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Run(run_args)) => run_pipeline(run_args).await,
        Some(Commands::Check(check_args)) => run_check(check_args).await,
        None => Ok(()), // main prints help before dispatching
    }
}

/// Execute the four pipeline stages against a resolved configuration
///
/// Validation issues do not fail this function: they are captured in the
/// returned report (with the normalize and write stages skipped), so the
/// caller decides the exit status after the validation report is on disk.
/// Parse, configuration, and I/O errors still propagate immediately.
pub async fn execute_run(config: &PipelineConfig) -> Result<RunReport> {
    let start = Instant::now();

    // Stage 1: ingest
    let IngestResult { records, stats } = IngestCoordinator::new(config.max_workers)
        .ingest(&config.csv_files, &config.json_files)
        .await?;

    // Stage 2: validate, then persist the report unconditionally
    let outcome = Validator::new(config.validation.clone()).validate(records);
    let validation = ValidationReport::new(
        config.name.as_str(),
        config.run_id.as_str(),
        outcome.total,
        outcome.valid.len(),
        outcome.issues.clone(),
    );
    let report_path = config.validation_report_path();
    write_validation_report(&report_path, &validation)?;

    // Stages 3 and 4 only run on a clean validation pass
    let write = if outcome.is_clean() {
        let rows = normalizer::normalize_records(&outcome.valid);
        let writer = OutputWriter::for_format(&config.output.format);
        Some(writer.write_outputs(config, &rows)?)
    } else {
        None
    };

    Ok(RunReport {
        ingest: stats,
        validation,
        report_path,
        write,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

/// Ingest and validate without touching the output directories
pub async fn execute_check(config: &PipelineConfig) -> Result<(IngestStats, ValidationOutcome)> {
    let IngestResult { records, stats } = IngestCoordinator::new(config.max_workers)
        .ingest(&config.csv_files, &config.json_files)
        .await?;

    let outcome = Validator::new(config.validation.clone()).validate(records);
    Ok((stats, outcome))
}

async fn run_pipeline(args: RunArgs) -> Result<()> {
    setup_logging(&args.log_level)?;

    let config = PipelineConfig::load(&args.config, args.run_id.clone())?;
    info!(
        "Starting pipeline '{}' run '{}' ({} CSV, {} JSON sources)",
        config.name,
        config.run_id,
        config.csv_files.len(),
        config.json_files.len()
    );

    let report = execute_run(&config).await?;
    print_run_report(&config, &report);

    if !report.validation.issues.is_empty() {
        return Err(Error::validation_failed(report.validation.issues.len()));
    }
    Ok(())
}

async fn run_check(args: CheckArgs) -> Result<()> {
    setup_logging(&args.log_level)?;

    let config = PipelineConfig::load(&args.config, Some(args.run_id.clone()))?;
    let (stats, outcome) = execute_check(&config).await?;

    println!("\n{}", "Check Summary".bright_green().bold());
    println!(
        "  {} {} files, {} records",
        "Ingested:".bright_cyan(),
        stats.files_read,
        stats.total_records()
    );
    println!(
        "  {} {} valid, {} invalid",
        "Validation:".bright_cyan(),
        outcome.valid.len(),
        outcome.invalid()
    );
    print_issues(&outcome.issues);

    if !outcome.is_clean() {
        return Err(Error::validation_failed(outcome.issues.len()));
    }
    Ok(())
}

fn print_run_report(config: &PipelineConfig, report: &RunReport) {
    println!("\n{}", "Pipeline Summary".bright_green().bold());
    println!(
        "  {} {} (run {})",
        "Pipeline:".bright_cyan(),
        config.name,
        config.run_id
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.elapsed_ms.to_string().bright_white()
    );
    println!(
        "  {} {} files, {} records ({} csv, {} json)",
        "Ingested:".bright_cyan(),
        report.ingest.files_read,
        report.ingest.total_records(),
        report.ingest.csv_records,
        report.ingest.json_records
    );
    println!(
        "  {} {} valid, {} invalid",
        "Validation:".bright_cyan(),
        report.validation.counts.valid.to_string().bright_white(),
        report.validation.counts.invalid
    );
    println!(
        "  {} {}",
        "Validation report:".bright_cyan(),
        report.report_path.display()
    );

    print_issues(&report.validation.issues);

    if let Some(write) = &report.write {
        println!(
            "  {} {} ({})",
            "Data file:".bright_cyan(),
            write.data_path.display(),
            write.data_format
        );
        println!(
            "  {} {}",
            "Run summary:".bright_cyan(),
            write.summary_path.display()
        );
    }
}

fn print_issues(issues: &[crate::app::models::report::ValidationIssue]) {
    if issues.is_empty() {
        return;
    }

    println!(
        "  {} {}",
        "Issues:".bright_red(),
        issues.len().to_string().bright_red().bold()
    );
    for issue in issues.iter().take(MAX_CONSOLE_ISSUES) {
        println!(
            "    record {} [{}] {}: {}",
            issue.record_id, issue.source_file, issue.field, issue.message
        );
    }
    if issues.len() > MAX_CONSOLE_ISSUES {
        println!("    ... and {} more", issues.len() - MAX_CONSOLE_ISSUES);
    }
}

/// Initialize console logging from the CLI filter string
fn setup_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .map_err(|e| Error::configuration(format!("invalid log level '{}': {}", level, e)))?;

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    Ok(())
}
