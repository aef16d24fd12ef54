//! # edgemon-schema: Telemetry Payload Validation
//!
//! Runtime JSON Schema (Draft 2020-12) validation for sensor payloads.
//!
//! ## Loading (`load`)
//!
//! [`load_schema`] resolves a relative schema path against an ordered
//! [`SchemaSearchPath`] and parses the first match. A missing schema is an
//! error that names every location tried.
//!
//! ## Validation (`validate`)
//!
//! [`validate_payload`] checks a payload against a schema and fails with a
//! [`SchemaValidationError`] carrying the violating path and reason.
//! [`PayloadValidator`] compiles a schema once for repeated use.
//!
//! ## Shipped Schemas
//!
//! - `schemas/sensor-data.schema.json`: nested `readings` and `anomaly`.
//! - `schemas/sensor-data-compat.schema.json`: flat legacy fields.
//! - `schemas/sensor-reading.schema.json`: the generated JSON Lines record.
//!
//! The validator treats all of them as arbitrary schema documents.

pub mod load;
pub mod validate;

pub use load::{load_schema, project_root, read_document, SchemaSearchPath};
pub use validate::{
    validate_payload, validate_payload_all, PayloadValidator, SchemaValidationError,
    ValidationViolations, ValidatorOptions, Violation,
};
