//! # Payload Validation
//!
//! Validates JSON payloads against JSON Schema documents (Draft 2020-12).
//!
//! ## Error Surfacing
//!
//! [`validate_payload`] stops at the first violation, the behavior callers
//! rely on. [`validate_payload_all`] collects every violation; its error
//! still answers [`SchemaValidationError::first_violation`] so callers of
//! either mode read the first problem the same way.
//!
//! ## Reference Resolution
//!
//! Internal `$ref`s (`#/$defs/...`) resolve natively. External `$ref`s are
//! never fetched: the offline retriever fails them, so such a schema does
//! not compile. JSON Schema metaschema URIs resolve to a permissive schema.
//!
//! ## Formats
//!
//! Draft 2020-12 treats `format` as an annotation. Set
//! [`ValidatorOptions::assert_formats`] to enforce it.

use std::fmt;
use std::path::PathBuf;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

const METASCHEMA_URI_PREFIX: &str = "https://json-schema.org/";

/// Retriever that resolves nothing over the network.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        if uri_str.starts_with(METASCHEMA_URI_PREFIX) {
            return Ok(serde_json::json!({}));
        }
        Err(format!("external $ref '{uri_str}' is not resolved offline").into())
    }
}

/// Error from loading schemas or documents, or from validation itself.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// No candidate location for the requested schema exists.
    #[error("schema not found: {requested}. Tried: {}", join_paths(candidates))]
    SchemaNotFound {
        /// Path as the caller supplied it.
        requested: String,
        /// Every location tried, in search order.
        candidates: Vec<PathBuf>,
    },

    /// The schema file exists but could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoadError {
        /// Schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The payload file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Payload file.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The schema is not a valid Draft 2020-12 schema, or has an
    /// unresolvable `$ref`.
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The payload did not conform to the schema.
    #[error("validation failed:\n{violations}")]
    ValidationFailed {
        /// One violation in first-error mode, all of them otherwise.
        violations: ValidationViolations,
    },
}

impl SchemaValidationError {
    /// The first violation, if this is a validation failure.
    pub fn first_violation(&self) -> Option<&Violation> {
        match self {
            Self::ValidationFailed { violations } => violations.first(),
            _ => None,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the payload.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Non-empty, ordered list of violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false for a value carried by [`SchemaValidationError`].
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation reported by the validator.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// All violations in report order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Knobs applied when compiling a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Treat `format` keywords as assertions instead of annotations.
    pub assert_formats: bool,
}

/// A compiled Draft 2020-12 schema, reusable across payloads.
///
/// Validation never mutates the payload or the schema.
pub struct PayloadValidator {
    validator: Validator,
}

impl fmt::Debug for PayloadValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadValidator").finish_non_exhaustive()
    }
}

impl PayloadValidator {
    /// Compile `schema` with default options.
    pub fn new(schema: &Value) -> Result<Self, SchemaValidationError> {
        Self::with_options(schema, ValidatorOptions::default())
    }

    /// Compile `schema` with explicit options.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::ValidatorBuildError`] if the schema is
    /// malformed or references an external document.
    pub fn with_options(
        schema: &Value,
        options: ValidatorOptions,
    ) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(options.assert_formats);
        opts.with_retriever(OfflineRetriever);

        let validator = opts
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Whether `payload` conforms.
    pub fn is_valid(&self, payload: &Value) -> bool {
        self.validator.is_valid(payload)
    }

    /// Validate, reporting only the first violation.
    pub fn validate(&self, payload: &Value) -> Result<(), SchemaValidationError> {
        self.check(payload, Some(1))
    }

    /// Validate, reporting every violation.
    pub fn validate_all(&self, payload: &Value) -> Result<(), SchemaValidationError> {
        self.check(payload, None)
    }

    fn check(&self, payload: &Value, limit: Option<usize>) -> Result<(), SchemaValidationError> {
        let errors = self.validator.iter_errors(payload).map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        });
        let violations: Vec<Violation> = match limit {
            Some(n) => errors.take(n).collect(),
            None => errors.collect(),
        };

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                count = violations.len(),
                instance_path = %violations[0].instance_path,
                "payload rejected"
            );
            Err(SchemaValidationError::ValidationFailed {
                violations: ValidationViolations { violations },
            })
        }
    }
}

/// Validate `payload` against `schema`, failing on the first violation.
pub fn validate_payload(payload: &Value, schema: &Value) -> Result<(), SchemaValidationError> {
    PayloadValidator::new(schema)?.validate(payload)
}

/// Validate `payload` against `schema`, collecting every violation.
pub fn validate_payload_all(payload: &Value, schema: &Value) -> Result<(), SchemaValidationError> {
    PayloadValidator::new(schema)?.validate_all(payload)
}
