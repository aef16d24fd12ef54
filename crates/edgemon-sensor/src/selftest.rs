//! Built-in smoke tests behind `edgemon generate --self-test`.
//!
//! Runs the real loop into a temporary directory and checks:
//! - `count = 5` yields exactly five lines;
//! - every line is standalone JSON with exactly the four record keys, the
//!   expected types, and loosely plausible values;
//! - two runs with the same seed produce the same readings.
//!
//! Timestamps are excluded from the determinism check: two runs can
//! straddle a second boundary.

use std::path::Path;
use std::time::Duration;

use edgemon_core::{DeviceId, EdgemonError};
use serde_json::Value;

use crate::config::WalkConfig;
use crate::logger::{run, RunOptions};
use crate::stop::StopSignal;

const RECORD_KEYS: [&str; 4] = ["timestamp", "temperature_C", "humidity", "device_id"];

/// Run the smoke tests. The first failed invariant is returned as
/// [`EdgemonError::SelfTest`].
pub fn self_test() -> Result<(), EdgemonError> {
    let dir = tempfile::tempdir().map_err(|e| EdgemonError::io(std::env::temp_dir(), e))?;

    let path = dir.path().join("out.jsonl");
    run(
        &options(&path, "self-test-node", 5, 123),
        &StopSignal::new(),
        None,
    )?;
    let lines = read_lines(&path)?;
    check(
        lines.len() == 5,
        format!("expected 5 lines, got {}", lines.len()),
    )?;
    for (i, line) in lines.iter().enumerate() {
        check_record(i, line)?;
    }

    let path_a = dir.path().join("a.jsonl");
    let path_b = dir.path().join("b.jsonl");
    run(&options(&path_a, "seeded", 3, 42), &StopSignal::new(), None)?;
    run(&options(&path_b, "seeded", 3, 42), &StopSignal::new(), None)?;
    let a = strip_timestamps(&read_lines(&path_a)?)?;
    let b = strip_timestamps(&read_lines(&path_b)?)?;
    check(a == b, "same seed should produce identical sequence")?;

    tracing::debug!("self-test invariants hold");
    Ok(())
}

fn options(path: &Path, device: &str, count: u64, seed: u64) -> RunOptions {
    RunOptions {
        device_id: DeviceId::new(device),
        interval: Duration::ZERO,
        count,
        output: path.to_path_buf(),
        seed: Some(seed),
        walk: WalkConfig::default(),
    }
}

fn check(cond: bool, msg: impl Into<String>) -> Result<(), EdgemonError> {
    if cond {
        Ok(())
    } else {
        Err(EdgemonError::SelfTest(msg.into()))
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, EdgemonError> {
    let content = std::fs::read_to_string(path).map_err(|e| EdgemonError::io(path, e))?;
    Ok(content.lines().map(str::to_owned).collect())
}

fn parse_line(i: usize, line: &str) -> Result<serde_json::Map<String, Value>, EdgemonError> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(EdgemonError::SelfTest(format!(
            "line {i} is not a JSON object: {other}"
        ))),
        Err(e) => Err(EdgemonError::SelfTest(format!(
            "line {i} is not valid JSON: {e}"
        ))),
    }
}

fn check_record(i: usize, line: &str) -> Result<(), EdgemonError> {
    let obj = parse_line(i, line)?;
    for key in RECORD_KEYS {
        check(obj.contains_key(key), format!("missing key {key} in line {i}: {line}"))?;
    }
    check(
        obj.len() == RECORD_KEYS.len(),
        format!("unexpected keys in line {i}: {line}"),
    )?;
    check(obj["timestamp"].is_string(), format!("timestamp not a string in line {i}"))?;
    check(obj["device_id"].is_string(), format!("device_id not a string in line {i}"))?;

    let temperature = obj["temperature_C"].as_f64();
    let humidity = obj["humidity"].as_f64();
    check(
        temperature.is_some_and(|t| (10.0..=40.0).contains(&t)),
        format!("temperature_C out of range in line {i}: {line}"),
    )?;
    check(
        humidity.is_some_and(|h| (0.0..=100.0).contains(&h)),
        format!("humidity out of range in line {i}: {line}"),
    )
}

fn strip_timestamps(lines: &[String]) -> Result<Vec<Value>, EdgemonError> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut obj = parse_line(i, line)?;
            obj.remove("timestamp");
            Ok(Value::Object(obj))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes() {
        self_test().unwrap();
    }

    #[test]
    fn test_check_record_accepts_valid_line() {
        let line = r#"{"timestamp": "2025-08-06T22:11:03Z", "temperature_C": 24.6, "humidity": 52.4, "device_id": "edge-node-001"}"#;
        check_record(0, line).unwrap();
    }

    #[test]
    fn test_check_record_rejects_missing_key() {
        let line = r#"{"timestamp": "2025-08-06T22:11:03Z", "humidity": 52.4, "device_id": "x"}"#;
        let err = check_record(2, line).unwrap_err();
        assert!(err.to_string().contains("temperature_C"), "got: {err}");
    }

    #[test]
    fn test_check_record_rejects_extra_key() {
        let line = r#"{"timestamp": "t", "temperature_C": 24.6, "humidity": 52.4, "device_id": "x", "extra": 1}"#;
        assert!(check_record(0, line).is_err());
    }

    #[test]
    fn test_check_record_rejects_out_of_range() {
        let line = r#"{"timestamp": "t", "temperature_C": 55.0, "humidity": 52.4, "device_id": "x"}"#;
        assert!(check_record(0, line).is_err());
        let line = r#"{"timestamp": "t", "temperature_C": 20.0, "humidity": "wet", "device_id": "x"}"#;
        assert!(check_record(0, line).is_err());
    }

    #[test]
    fn test_check_record_rejects_non_object() {
        assert!(check_record(0, "[1, 2]").is_err());
        assert!(check_record(0, "not json").is_err());
    }
}
