//! # JSON Lines Writer
//!
//! Appends one JSON object per line. Records use `", "` between members and
//! `": "` between key and value:
//!
//! ```text
//! {"timestamp": "2025-08-06T22:11:03Z", "temperature_C": 24.6, "humidity": 52.4, "device_id": "edge-node-001"}
//! ```
//!
//! Non-ASCII text is written as UTF-8, not escaped.
//!
//! Each record goes to the file in a single `write_all` on an append-mode
//! handle with no user-space buffer, so a run that is interrupted leaves
//! only complete lines behind.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use edgemon_core::EdgemonError;
use serde::Serialize;
use serde_json::ser::Formatter;

/// serde_json formatter producing single-line output with spaced separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize `value` as one record line, without the trailing newline.
pub fn to_line<T: Serialize>(value: &T) -> Result<String, EdgemonError> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Append-only JSON Lines file.
#[derive(Debug)]
pub struct JsonlWriter {
    path: PathBuf,
    file: File,
}

impl JsonlWriter {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EdgemonError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EdgemonError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| EdgemonError::io(&path, e))?;
        Ok(Self { path, file })
    }

    /// Path this writer appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, returning the line written (without newline).
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<String, EdgemonError> {
        let line = to_line(record)?;
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.file
            .write_all(&bytes)
            .map_err(|e| EdgemonError::io(&self.path, e))?;
        Ok(line)
    }
}
