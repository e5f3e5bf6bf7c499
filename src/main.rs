use clap::Parser;
use obs_pipeline::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the selected command
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            // Success - the command has already reported its summary
            process::exit(0);
        }
        Err(error @ obs_pipeline::Error::ValidationFailed { .. }) => {
            // The validation report is on disk; the distinct exit code lets
            // schedulers tell data problems from pipeline problems
            eprintln!("Error: {}", error);
            process::exit(2);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Observation Pipeline - Sensor Data Batch Processor");
    println!("==================================================");
    println!();
    println!("Ingest CSV and JSON sensor-observation files, validate every record");
    println!("against configurable domain rules, and write normalized tabular output");
    println!("plus JSON audit reports.");
    println!();
    println!("USAGE:");
    println!("    obs-pipeline <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    run       Run the full pipeline and write all outputs (main command)");
    println!("    check     Ingest and validate only, without writing outputs");
    println!("    help      Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run with the default ./pipeline.toml configuration:");
    println!("    obs-pipeline run");
    println!();
    println!("    # Run with an explicit configuration and scheduler-issued run id:");
    println!("    obs-pipeline run --config conf/pipeline.toml --run-id 20260218T1000");
    println!();
    println!("    # Validate sources without writing anything:");
    println!("    obs-pipeline check --config conf/pipeline.toml");
    println!();
    println!("For detailed help on any command, use:");
    println!("    obs-pipeline <COMMAND> --help");
}
