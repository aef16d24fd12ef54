//! # edgemon CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use edgemon_cli::generate::{run_generate, GenerateArgs};
use edgemon_cli::validate::{run_validate, ValidateArgs};
use edgemon_cli::{init_tracing, LogConfig, LogLevel, EXIT_ERROR};

/// Edge telemetry toolkit.
///
/// Generates mock DHT22 temperature/humidity readings as JSON Lines and
/// validates telemetry payloads against JSON Schemas.
#[derive(Parser, Debug)]
#[command(name = "edgemon", version, about, long_about = None)]
struct Cli {
    /// Log verbosity (DEBUG, INFO, WARNING, ERROR). RUST_LOG overrides it.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, ignore_case = true, global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log mock sensor readings as JSON Lines.
    Generate(GenerateArgs),

    /// Validate a JSON or YAML payload against a JSON Schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log = LogConfig {
        level: cli.log_level,
        json: cli.log_json,
    };
    if let Err(e) = init_tracing(&log) {
        eprintln!("{e:#}");
        return ExitCode::from(EXIT_ERROR);
    }

    tracing::debug!("edgemon v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
