//! # Validate Subcommand
//!
//! Validates one payload file against one JSON Schema.
//!
//! Prints `OK` on success (exit 0). A non-conforming payload prints the
//! violation to stderr and exits 1. A schema that cannot be found or
//! compiled, or an unreadable payload, is an operational error (exit 2).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use edgemon_schema::{
    read_document, PayloadValidator, SchemaSearchPath, SchemaValidationError, ValidatorOptions,
};

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for `edgemon validate`.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Schema file. Searched as given, under the project root, then under
    /// the project's schemas/ directory.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    pub all_errors: bool,

    /// Treat `format` keywords (e.g. date-time) as assertions.
    #[arg(long)]
    pub strict_formats: bool,

    /// Payload file. `.yaml`/`.yml` files are parsed as YAML, others as JSON.
    #[arg(value_name = "JSON_FILE")]
    pub json_file: PathBuf,
}

/// Execute `edgemon validate` against the discovered schema search path.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let search = SchemaSearchPath::discover();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    validate_with(args, &search, &mut stdout.lock(), &mut stderr.lock())
}

/// Validate with an explicit search path and output sinks.
pub fn validate_with(
    args: &ValidateArgs,
    search: &SchemaSearchPath,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u8> {
    let schema = search
        .load(&args.schema)
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?;
    let validator = PayloadValidator::with_options(
        &schema,
        ValidatorOptions {
            assert_formats: args.strict_formats,
        },
    )
    .with_context(|| format!("cannot compile schema {}", args.schema.display()))?;

    let payload = read_document(&args.json_file)?;

    let outcome = if args.all_errors {
        validator.validate_all(&payload)
    } else {
        validator.validate(&payload)
    };

    match outcome {
        Ok(()) => {
            writeln!(out, "OK")?;
            tracing::debug!(
                schema = %args.schema.display(),
                payload = %args.json_file.display(),
                "payload valid"
            );
            Ok(EXIT_OK)
        }
        Err(SchemaValidationError::ValidationFailed { violations }) => {
            writeln!(err, "FAIL: {}", args.json_file.display())?;
            for violation in violations.violations() {
                writeln!(err, "{violation}")?;
            }
            Ok(EXIT_INVALID)
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("point.schema.json");
        std::fs::write(
            &path,
            r#"{
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "type": "object",
                "required": ["x", "when"],
                "properties": {
                    "x": {"type": "number", "maximum": 10},
                    "when": {"type": "string", "format": "date-time"}
                }
            }"#,
        )
        .unwrap();
        path
    }

    fn run(args: &ValidateArgs, root: &Path) -> (Result<u8>, String, String) {
        let search = SchemaSearchPath::new(root);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = validate_with(args, &search, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn args(schema: PathBuf, payload: PathBuf) -> ValidateArgs {
        ValidateArgs {
            schema,
            all_errors: false,
            strict_formats: false,
            json_file: payload,
        }
    }

    #[test]
    fn test_ok_printed_for_valid_payload() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let payload = dir.path().join("p.json");
        std::fs::write(&payload, r#"{"x": 3, "when": "2025-08-16T12:00:00Z"}"#).unwrap();

        let (code, out, err) = run(&args(schema, payload), dir.path());
        assert_eq!(code.unwrap(), EXIT_OK);
        assert_eq!(out, "OK\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_invalid_payload_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let payload = dir.path().join("p.json");
        std::fs::write(&payload, r#"{"x": 30}"#).unwrap();

        let (code, out, err) = run(&args(schema.clone(), payload.clone()), dir.path());
        assert_eq!(code.unwrap(), EXIT_INVALID);
        assert!(out.is_empty());
        assert_eq!(err.lines().count(), 2, "first-error mode: {err}");

        let mut all = args(schema, payload);
        all.all_errors = true;
        let (code, _, err) = run(&all, dir.path());
        assert_eq!(code.unwrap(), EXIT_INVALID);
        assert!(err.lines().count() >= 3, "all-errors mode: {err}");
    }

    #[test]
    fn test_strict_formats() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let payload = dir.path().join("p.yaml");
        std::fs::write(&payload, "x: 1\nwhen: last tuesday\n").unwrap();

        let mut a = args(schema, payload);
        let (code, _, _) = run(&a, dir.path());
        assert_eq!(code.unwrap(), EXIT_OK);

        a.strict_formats = true;
        let (code, _, _) = run(&a, dir.path());
        assert_eq!(code.unwrap(), EXIT_INVALID);
    }

    #[test]
    fn test_schema_resolved_from_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        let schemas = dir.path().join("schemas");
        std::fs::create_dir_all(&schemas).unwrap();
        write_schema(&schemas);
        let payload = dir.path().join("p.json");
        std::fs::write(&payload, r#"{"x": 3, "when": "2025-08-16T12:00:00Z"}"#).unwrap();

        let (code, out, _) = run(
            &args(PathBuf::from("point.schema.json"), payload),
            dir.path(),
        );
        assert_eq!(code.unwrap(), EXIT_OK);
        assert_eq!(out, "OK\n");
    }

    #[test]
    fn test_missing_schema_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("p.json");
        std::fs::write(&payload, "{}").unwrap();

        let (code, _, _) = run(
            &args(PathBuf::from("nope.schema.json"), payload),
            dir.path(),
        );
        let err = code.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Tried:"), "got: {msg}");
        assert!(matches!(
            err.downcast_ref::<SchemaValidationError>(),
            Some(SchemaValidationError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn test_unreadable_payload_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path());
        let (code, _, _) = run(&args(schema, dir.path().join("missing.json")), dir.path());
        assert!(code.is_err());
    }
}
