//! # edgemon-core: Foundational Types for edgemon
//!
//! Shared primitives for the mock sensor logger and the payload validator.
//! Every other crate in the workspace depends on `edgemon-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** [`Timestamp`] enforces UTC with a `Z` suffix
//!    and seconds precision, the exact shape written into every record.
//!
//! 2. **Newtype for device identifiers.** [`DeviceId`] is opaque, but it is
//!    never a bare `String` in a public signature.
//!
//! 3. **One record type.** [`SensorReading`] is the single value that turns
//!    into one JSON Lines record. Its field names and order are part of the
//!    wire format.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `edgemon-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod reading;
pub mod temporal;

pub use error::EdgemonError;
pub use reading::{DeviceId, SensorReading};
pub use temporal::Timestamp;
