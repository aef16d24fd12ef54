//! # Schema and Document Loading
//!
//! Schemas are addressed by relative path and searched for in an ordered
//! list of base directories:
//!
//! 1. the path as given (absolute, or relative to the working directory);
//! 2. the project root joined with the path;
//! 3. the project's `schemas/` directory joined with the path.
//!
//! The first candidate that exists wins. When none exists the error lists
//! every candidate tried.
//!
//! The project root is `$EDGEMON_PROJECT_ROOT` when set, otherwise the
//! nearest ancestor of the working directory that contains `schemas/`,
//! otherwise the workspace this crate was built from.
//!
//! Files are read as UTF-8; a leading byte-order mark is ignored.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::validate::SchemaValidationError;

/// Environment variable overriding project root discovery.
pub const PROJECT_ROOT_ENV: &str = "EDGEMON_PROJECT_ROOT";

/// Directory under the project root holding the shipped schemas.
pub const SCHEMA_DIR: &str = "schemas";

/// Ordered base directories searched for schema files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSearchPath {
    bases: Vec<PathBuf>,
}

impl SchemaSearchPath {
    /// Working directory, `project_root`, then `project_root/schemas`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        let schema_dir = root.join(SCHEMA_DIR);
        Self {
            bases: vec![PathBuf::new(), root, schema_dir],
        }
    }

    /// Search path rooted at the discovered project root.
    pub fn discover() -> Self {
        Self::new(project_root())
    }

    /// Explicit base directories, searched in order. An empty path means
    /// "as given".
    pub fn from_bases(bases: Vec<PathBuf>) -> Self {
        Self { bases }
    }

    /// Every candidate location for `rel`, in search order.
    pub fn candidates(&self, rel: &Path) -> Vec<PathBuf> {
        self.bases.iter().map(|base| base.join(rel)).collect()
    }

    /// First existing candidate for `rel`.
    pub fn locate(&self, rel: impl AsRef<Path>) -> Result<PathBuf, SchemaValidationError> {
        let rel = rel.as_ref();
        let candidates = self.candidates(rel);
        match candidates.iter().find(|c| c.exists()) {
            Some(found) => {
                tracing::debug!(requested = %rel.display(), found = %found.display(), "schema located");
                Ok(found.clone())
            }
            None => Err(SchemaValidationError::SchemaNotFound {
                requested: rel.display().to_string(),
                candidates,
            }),
        }
    }

    /// Locate `rel` and parse it as JSON.
    pub fn load(&self, rel: impl AsRef<Path>) -> Result<Value, SchemaValidationError> {
        let path = self.locate(rel)?;
        read_json_text(&path).map_err(|reason| SchemaValidationError::SchemaLoadError {
            path: path.display().to_string(),
            reason,
        })
    }
}

/// Load a schema through the discovered search path.
pub fn load_schema(rel: impl AsRef<Path>) -> Result<Value, SchemaValidationError> {
    SchemaSearchPath::discover().load(rel)
}

/// Resolve the project root. See the module docs for the order.
pub fn project_root() -> PathBuf {
    if let Some(root) = std::env::var_os(PROJECT_ROOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }
    if let Some(root) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_root_above(&cwd))
    {
        return root;
    }
    build_workspace_root()
}

/// Nearest ancestor of `start` (inclusive) containing a `schemas/` directory.
pub fn find_root_above(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(SCHEMA_DIR).is_dir())
        .map(Path::to_path_buf)
}

fn build_workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/edgemon-schema -> workspace root
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Read a JSON payload document.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; anything else as
/// JSON.
pub fn read_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_err = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => {
            let content = read_text(path).map_err(load_err)?;
            serde_yaml::from_str(&content).map_err(|e| load_err(format!("invalid YAML: {e}")))
        }
        _ => read_json_text(path).map_err(load_err),
    }
}

fn read_text(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("cannot read file: {e}"))?;
    let text = String::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {e}"))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn read_json_text(path: &Path) -> Result<Value, String> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_order() {
        let search = SchemaSearchPath::new("/proj");
        assert_eq!(
            search.candidates(Path::new("schemas/a.json")),
            vec![
                PathBuf::from("schemas/a.json"),
                PathBuf::from("/proj/schemas/a.json"),
                PathBuf::from("/proj/schemas/schemas/a.json"),
            ]
        );
    }

    #[test]
    fn test_absolute_path_wins_everywhere() {
        let search = SchemaSearchPath::new("/proj");
        for c in search.candidates(Path::new("/abs/a.json")) {
            assert_eq!(c, PathBuf::from("/abs/a.json"));
        }
    }

    #[test]
    fn test_locate_prefers_earlier_base() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("s.json"), "{}").unwrap();
        std::fs::write(second.join("s.json"), "{}").unwrap();

        let search = SchemaSearchPath::from_bases(vec![first.clone(), second]);
        assert_eq!(search.locate("s.json").unwrap(), first.join("s.json"));
    }

    #[test]
    fn test_locate_falls_through_to_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(SCHEMA_DIR)).unwrap();
        std::fs::write(
            dir.path().join(SCHEMA_DIR).join("only-here.schema.json"),
            r#"{"type": "object"}"#,
        )
        .unwrap();

        let search = SchemaSearchPath::new(dir.path());
        let schema = search.load("only-here.schema.json").unwrap();
        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn test_not_found_names_every_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let search = SchemaSearchPath::new(dir.path());
        let err = search.load("nope/missing.schema.json").unwrap_err();
        match &err {
            SchemaValidationError::SchemaNotFound {
                requested,
                candidates,
            } => {
                assert_eq!(requested, "nope/missing.schema.json");
                assert_eq!(candidates.len(), 3);
            }
            other => panic!("expected SchemaNotFound, got: {other}"),
        }
        let msg = err.to_string();
        for c in search.candidates(Path::new("nope/missing.schema.json")) {
            assert!(msg.contains(&c.display().to_string()), "{msg}");
        }
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.schema.json");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"type": "number"}"#);
        std::fs::write(&path, bytes).unwrap();

        let schema = SchemaSearchPath::new(dir.path()).load(&path).unwrap();
        assert_eq!(schema["type"], "number");
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.schema.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = SchemaSearchPath::new(dir.path()).load(&path).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::SchemaLoadError { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn test_read_document_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("p.yaml");
        std::fs::write(&yaml, "temperature: 28.4\nanomaly_detected: false\n").unwrap();
        let json = dir.path().join("p.json");
        std::fs::write(&json, r#"{"temperature": 28.4, "anomaly_detected": false}"#).unwrap();

        assert_eq!(read_document(&yaml).unwrap(), read_document(&json).unwrap());
    }

    #[test]
    fn test_read_document_missing() {
        let err = read_document(Path::new("no/such/payload.json")).unwrap_err();
        assert!(matches!(
            err,
            SchemaValidationError::DocumentLoadError { .. }
        ));
    }

    #[test]
    fn test_find_root_above() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(SCHEMA_DIR)).unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_root_above(&nested).unwrap(), dir.path());
    }

    #[test]
    fn test_build_workspace_root_has_schemas() {
        assert!(build_workspace_root().join(SCHEMA_DIR).is_dir());
    }
}
