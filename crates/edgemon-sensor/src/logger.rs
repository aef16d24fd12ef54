//! # Sampling Loop
//!
//! Samples the mock sensor, stamps each sample with the current UTC time
//! and the device identifier, and appends it to the output file. Optionally
//! echoes each line to a second sink (stdout in the binary).
//!
//! `count == 0` means run until stopped. A stop request is a clean
//! shutdown: lines already written stay valid and the run returns `Ok`.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use edgemon_core::{DeviceId, EdgemonError, SensorReading, Timestamp};

use crate::config::WalkConfig;
use crate::jsonl::JsonlWriter;
use crate::mock::MockDht22;
use crate::stop::StopSignal;

/// Parameters of one logging run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Identifier written into every record.
    pub device_id: DeviceId,
    /// Wait between consecutive samples.
    pub interval: Duration,
    /// Number of records to write; `0` runs until stopped.
    pub count: u64,
    /// JSON Lines output file, appended to.
    pub output: PathBuf,
    /// PRNG seed; `None` for a non-reproducible run.
    pub seed: Option<u64>,
    /// Walk parameters for the mock sensor.
    pub walk: WalkConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            device_id: DeviceId::new("edge-node-001"),
            interval: Duration::from_secs(2),
            count: 30,
            output: PathBuf::from("data/sensor_log.jsonl"),
            seed: None,
            walk: WalkConfig::default(),
        }
    }
}

impl RunOptions {
    /// Convert a user-supplied interval in seconds. Negative and NaN
    /// values mean no wait; values too large for a `Duration` saturate.
    pub fn interval_from_secs(secs: f64) -> Duration {
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Outcome of a run that ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Records appended to the output file.
    pub written: u64,
    /// Whether the run ended because of a stop request.
    pub interrupted: bool,
}

/// Take one sample and wrap it as a record.
pub fn emit_reading(device_id: &DeviceId, sensor: &mut MockDht22) -> SensorReading {
    let sample = sensor.sample();
    SensorReading {
        timestamp: Timestamp::now(),
        temperature_c: sample.temperature_c,
        humidity: sample.humidity,
        device_id: device_id.clone(),
    }
}

/// Run the sampling loop until `count` records are written or `stop` fires.
///
/// # Errors
///
/// Invalid walk configuration, or any failure opening, writing, or echoing
/// output. Nothing is retried.
pub fn run(
    opts: &RunOptions,
    stop: &StopSignal,
    mut echo: Option<&mut dyn Write>,
) -> Result<RunSummary, EdgemonError> {
    let mut sensor = MockDht22::new(opts.walk, opts.seed)?;
    let mut writer = JsonlWriter::open(&opts.output)?;

    tracing::info!(
        device_id = %opts.device_id,
        output = %writer.path().display(),
        count = opts.count,
        interval_ms = opts.interval.as_millis() as u64,
        seeded = opts.seed.is_some(),
        "starting mock sensor run"
    );

    let mut written = 0u64;
    loop {
        if stop.is_triggered() {
            tracing::info!(written, "Interrupted by user; exiting.");
            return Ok(RunSummary {
                written,
                interrupted: true,
            });
        }

        let reading = emit_reading(&opts.device_id, &mut sensor);
        let line = writer.append(&reading)?;
        written += 1;
        tracing::debug!(
            temperature_c = reading.temperature_c,
            humidity = reading.humidity,
            written,
            "reading logged"
        );

        if let Some(out) = echo.as_deref_mut() {
            writeln!(out, "{line}")
                .and_then(|()| out.flush())
                .map_err(|e| EdgemonError::io("<echo>", e))?;
        }

        if opts.count > 0 && written >= opts.count {
            tracing::info!(written, output = %writer.path().display(), "run complete");
            return Ok(RunSummary {
                written,
                interrupted: false,
            });
        }

        stop.wait(opts.interval);
    }
}
