//! Document file I/O.
//!
//! This is the boundary to the external textual reader/writer: files come in
//! as untyped value trees and go back out the same way. The engine itself
//! never touches the filesystem; [`load`] and [`save`] are the thin
//! conveniences the host dialog calls around a reconciliation pass.

use std::path::Path;

use serde_yaml::Value;

use crate::diagnostics::Diagnostics;
use crate::document::ConfigDocument;
use crate::error::GeocfgError;

/// Read a document file into an untyped value tree.
///
/// An empty file reads as null, which reconciles into an all-defaults
/// document.
pub fn read_document(path: &Path) -> Result<Value, GeocfgError> {
    let content = std::fs::read_to_string(path).map_err(|e| GeocfgError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| GeocfgError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write an untyped value tree back to a document file.
pub fn write_document(path: &Path, value: &Value) -> Result<(), GeocfgError> {
    let content = serde_yaml::to_string(value)?;
    std::fs::write(path, content).map_err(|e| GeocfgError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a file and reconcile it into a typed document.
///
/// Loading always succeeds on readable, parseable input; schema problems
/// surface in the returned diagnostics, never as an error.
pub fn load(path: &Path) -> Result<(ConfigDocument, Diagnostics), GeocfgError> {
    let raw = read_document(path)?;
    let mut document = ConfigDocument::default();
    let diagnostics = document.apply(&raw);
    Ok((document, diagnostics))
}

/// Re-emit a document and write it out.
pub fn save(path: &Path, document: &ConfigDocument) -> Result<(), GeocfgError> {
    write_document(path, &document.to_value())
}
