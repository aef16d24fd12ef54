//! # edgemon-sensor: Mock Sensor and JSON Lines Logger
//!
//! Generates plausible temperature/humidity readings, as if from a DHT22,
//! without any hardware, and appends them to a JSON Lines file.
//!
//! ## Modules
//!
//! - [`config`]: walk parameters (start values, bounds, step sigmas).
//! - [`mock`]: [`MockDht22`], the seeded bounded random walk.
//! - [`jsonl`]: append-only, one-record-per-line writer.
//! - [`stop`]: [`StopSignal`], the cooperative interrupt flag.
//! - [`logger`]: the sampling loop tying the pieces together.
//! - [`selftest`]: invariants checked by `edgemon generate --self-test`.
//!
//! ## Crate Policy
//!
//! - Real sensor drivers do not belong here.
//! - The sampling loop is synchronous. The only blocking points are the
//!   file write and the wait between samples.

pub mod config;
pub mod jsonl;
pub mod logger;
pub mod mock;
pub mod selftest;
pub mod stop;

pub use config::{ChannelConfig, WalkConfig};
pub use jsonl::JsonlWriter;
pub use logger::{emit_reading, run, RunOptions, RunSummary};
pub use mock::{MockDht22, Sample};
pub use selftest::self_test;
pub use stop::StopSignal;
