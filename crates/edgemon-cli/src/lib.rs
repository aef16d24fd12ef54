//! # edgemon-cli: Command-Line Interface
//!
//! Provides the `edgemon` binary.
//!
//! ## Subcommands
//!
//! - `edgemon generate`: log mock DHT22 readings as JSON Lines.
//! - `edgemon validate`: check a payload file against a JSON Schema.
//!
//! ```bash
//! edgemon generate --count 60 --interval 2 --device-id edge-node-001 --output data/sensor_log.jsonl
//! edgemon generate --self-test
//! edgemon validate --schema schemas/sensor-data.schema.json payload.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; sampling and validation live in the
//!   domain crates.
//! - Logging is configured once, in `main`, from an explicit [`LogConfig`].

pub mod generate;
pub mod interrupt;
pub mod logging;
pub mod validate;

pub use logging::{init_tracing, LogConfig, LogLevel};

/// Exit code for success, including an interrupted generation run.
pub const EXIT_OK: u8 = 0;

/// Exit code when a payload fails validation.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for operational errors: missing schema, unreadable files,
/// invalid configuration, write failures.
pub const EXIT_ERROR: u8 = 2;
