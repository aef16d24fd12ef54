//! Tracing subscriber setup.
//!
//! Log output goes to stderr so that `generate` can echo clean JSON Lines
//! on stdout. `RUST_LOG`, when set, overrides `--log-level`.

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    /// Per-reading detail.
    Debug,
    /// Run start, completion, and interruption.
    #[default]
    Info,
    /// Recoverable oddities only.
    Warning,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

/// Caller-owned logging configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level emitted.
    pub level: LogLevel,
    /// Emit JSON objects instead of human-readable lines.
    pub json: bool,
}

impl LogConfig {
    /// Filter built from `RUST_LOG` if present, else from `level`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }
}

/// Install the global subscriber. Call once per process.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        assert_eq!(LogLevel::Debug.as_directive(), "debug");
        assert_eq!(LogLevel::Info.as_directive(), "info");
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
        assert_eq!(LogLevel::Error.as_directive(), "error");
    }

    #[test]
    fn test_value_names_are_upper_case() {
        let parsed = LogLevel::from_str("WARNING", false).unwrap();
        assert_eq!(parsed, LogLevel::Warning);
        assert!(LogLevel::from_str("warning", false).is_err());
        assert_eq!(LogLevel::from_str("debug", true).unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(LogConfig::default().level, LogLevel::Info);
        assert!(!LogConfig::default().json);
    }
}
