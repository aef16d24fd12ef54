//! # Walk Configuration
//!
//! Parameters of the bounded random walk, one [`ChannelConfig`] per
//! measured quantity. Defaults describe a comfortable indoor room.
//!
//! A config file may be YAML or JSON (JSON is valid YAML):
//!
//! ```yaml
//! temperature: { start: 21.0, min: 15.0, max: 28.0, step_sigma: 0.1 }
//! humidity:    { start: 45.0, min: 20.0, max: 80.0, step_sigma: 0.5 }
//! ```
//!
//! An omitted channel keeps its default; a present channel must list all
//! four fields.

use std::path::Path;

use edgemon_core::EdgemonError;
use serde::{Deserialize, Serialize};

/// Parameters for one walked quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Value before the first sample.
    pub start: f64,
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
    /// Standard deviation of each Normal step.
    pub step_sigma: f64,
}

impl ChannelConfig {
    fn validate(&self, name: &str) -> Result<(), EdgemonError> {
        for (field, value) in [
            ("start", self.start),
            ("min", self.min),
            ("max", self.max),
            ("step_sigma", self.step_sigma),
        ] {
            if !value.is_finite() {
                return Err(EdgemonError::InvalidConfig(format!(
                    "{name}.{field} must be finite, got {value}"
                )));
            }
        }
        if self.min > self.max {
            return Err(EdgemonError::InvalidConfig(format!(
                "{name}.min ({}) is greater than {name}.max ({})",
                self.min, self.max
            )));
        }
        if self.step_sigma < 0.0 {
            return Err(EdgemonError::InvalidConfig(format!(
                "{name}.step_sigma must be >= 0, got {}",
                self.step_sigma
            )));
        }
        Ok(())
    }
}

/// Full walk configuration for a [`MockDht22`](crate::MockDht22).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Temperature in degrees Celsius.
    pub temperature: ChannelConfig,
    /// Relative humidity in percent.
    pub humidity: ChannelConfig,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            temperature: ChannelConfig {
                start: 23.5,
                min: 18.0,
                max: 30.0,
                step_sigma: 0.15,
            },
            humidity: ChannelConfig {
                start: 50.0,
                min: 30.0,
                max: 70.0,
                step_sigma: 0.4,
            },
        }
    }
}

impl WalkConfig {
    /// Check every channel. Called by [`MockDht22::new`](crate::MockDht22::new).
    ///
    /// A start value outside the bounds is allowed; the first sample pulls
    /// it back in.
    pub fn validate(&self) -> Result<(), EdgemonError> {
        self.temperature.validate("temperature")?;
        self.humidity.validate("humidity")
    }

    /// Load and validate a YAML or JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, EdgemonError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EdgemonError::io(path, e))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            EdgemonError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}
