//! Document I/O — load a layout manifest from disk and write the optimized one back.
//!
//! Output is pretty-printed with 4-space indentation. Writes go to a temporary
//! file next to the target and are persisted over it in one rename, so a failed
//! save leaves any previous output intact.

use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::DocumentError;
use crate::models::Document;

/// Reads and parses the document at `path`.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DocumentError::NotFound(path.to_path_buf()),
        _ => DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let document: Document =
        serde_json::from_str(&raw).map_err(|e| DocumentError::InvalidJson {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(
        path = %path.display(),
        screens = document.screens().map_or(0, |s| s.len()),
        components = document.component_count(),
        "Loaded document"
    );

    Ok(document)
}

/// Serializes `document` with 4-space indentation and atomically replaces `path`.
pub fn save_document(document: &Document, path: &Path) -> Result<(), DocumentError> {
    let bytes = to_pretty_json(document)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let io_err = |source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;

    tmp.persist(path).map_err(|e| DocumentError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!("Optimized layout saved to {}", path.display());
    Ok(())
}

/// Pretty JSON with a 4-space indent and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, DocumentError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
