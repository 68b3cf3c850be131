//! Diagnostics collected by a reconciliation pass.
//!
//! Reconciliation never fails: every field that cannot be filled from input
//! keeps its default and leaves a trace here instead. Two kinds of trace:
//!
//! - **missing**: a mandatory field was absent from the input.
//! - **wrong type**: a value was present but structurally incompatible with
//!   every declared alternative, so it was discarded.
//!
//! Paths are dotted (`resources.obs.extents.spatial.bbox`), with bracketed
//! positions for sequence elements. Optional fields never appear in either
//! list: omitting them is valid, not reportable.

use serde::Serialize;

/// The outcome report of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Dotted paths of mandatory fields absent from the input.
    pub missing: Vec<String>,
    /// Dotted paths of fields whose input value was discarded as incompatible.
    pub wrong_type: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub(crate) fn push_missing(&mut self, path: impl Into<String>) {
        self.missing.push(path.into());
    }

    pub(crate) fn push_wrong_type(&mut self, path: impl Into<String>) {
        self.wrong_type.push(path.into());
    }

    /// Union of both lists: missing paths first, then wrong-type paths not
    /// already present. Order is stable across runs.
    pub fn all(&self) -> Vec<String> {
        let mut union = self.missing.clone();
        for path in &self.wrong_type {
            if !union.contains(path) {
                union.push(path.clone());
            }
        }
        union
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.wrong_type.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len() + self.wrong_type.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let diag = Diagnostics::new();
        assert!(diag.is_empty());
        assert_eq!(diag.len(), 0);
        assert!(diag.all().is_empty());
    }

    #[test]
    fn all_unions_both_lists() {
        let mut diag = Diagnostics::new();
        diag.push_missing("server.url");
        diag.push_wrong_type("logging.level");
        assert_eq!(diag.all(), vec!["server.url", "logging.level"]);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn all_deduplicates() {
        let mut diag = Diagnostics::new();
        diag.push_missing("server.url");
        diag.push_wrong_type("server.url");
        assert_eq!(diag.all(), vec!["server.url"]);
    }
}
