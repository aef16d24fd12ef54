//! # Generate Subcommand
//!
//! Logs mock temperature/humidity readings as JSON Lines, optionally
//! echoing each line to stdout.
//!
//! Ctrl-C ends the run cleanly: lines already written stay intact and the
//! command exits 0.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use edgemon_core::DeviceId;
use edgemon_sensor::{run, self_test, RunOptions, RunSummary, StopSignal, WalkConfig};

use crate::EXIT_OK;

/// Arguments for `edgemon generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Logical device identifier.
    #[arg(long, default_value = "edge-node-001")]
    pub device_id: String,

    /// Seconds between readings. Negative values mean no wait.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub interval: f64,

    /// Number of readings to generate (0 = run until interrupted).
    #[arg(long, default_value_t = 30)]
    pub count: u64,

    /// Path to the JSON Lines output file. Appended to.
    #[arg(long, default_value = "data/sensor_log.jsonl")]
    pub output: PathBuf,

    /// Random seed for reproducible sequences.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not also echo readings to stdout while logging to file.
    #[arg(long)]
    pub no_stdout: bool,

    /// YAML or JSON file overriding walk start values, bounds, and steps.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run built-in smoke tests and exit.
    #[arg(long)]
    pub self_test: bool,
}

impl GenerateArgs {
    /// Build run options, loading the walk config file if given.
    pub fn run_options(&self) -> Result<RunOptions> {
        let walk = match &self.config {
            Some(path) => WalkConfig::from_path(path)
                .with_context(|| format!("failed to load walk config {}", path.display()))?,
            None => WalkConfig::default(),
        };
        Ok(RunOptions {
            device_id: DeviceId::new(self.device_id.as_str()),
            interval: RunOptions::interval_from_secs(self.interval),
            count: self.count,
            output: self.output.clone(),
            seed: self.seed,
            walk,
        })
    }
}

/// Execute `edgemon generate`.
///
/// Returns exit code 0 on completion, interruption, or passing self-test.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    if args.self_test {
        self_test().context("self-test failed")?;
        tracing::info!("Self-tests passed.");
        return Ok(EXIT_OK);
    }

    let stop = StopSignal::new();
    crate::interrupt::watch(stop.clone())?;

    let summary = if args.no_stdout {
        generate(args, &stop, None)?
    } else {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        generate(args, &stop, Some(&mut lock as &mut dyn Write))?
    };

    tracing::debug!(
        written = summary.written,
        interrupted = summary.interrupted,
        "generate finished"
    );
    Ok(EXIT_OK)
}

/// Run the sampling loop for `args` against an explicit stop signal and
/// echo sink.
pub fn generate(
    args: &GenerateArgs,
    stop: &StopSignal,
    echo: Option<&mut dyn Write>,
) -> Result<RunSummary> {
    let opts = args.run_options()?;
    run(&opts, stop, echo)
        .with_context(|| format!("generation run into {} failed", opts.output.display()))
}
