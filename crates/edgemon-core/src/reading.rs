//! # Sensor Readings
//!
//! `SensorReading` is the value written as one JSON Lines record:
//!
//! ```json
//! {"timestamp": "2025-08-06T22:11:03Z", "temperature_C": 24.6, "humidity": 52.4, "device_id": "edge-node-001"}
//! ```
//!
//! Field order in the struct is the key order on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// Logical device identifier. Opaque to edgemon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One timestamped temperature/humidity sample from a device.
///
/// Created per sample, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorReading {
    /// UTC time the sample was taken.
    pub timestamp: Timestamp,
    /// Degrees Celsius, one decimal.
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    /// Relative humidity in percent, one decimal.
    pub humidity: f64,
    /// Device that produced the sample.
    pub device_id: DeviceId,
}
