//! Business-rule validation of a reconciled document.
//!
//! Independent of the load-time diagnostics: those report how the input
//! mapped onto the schema, while these rules judge the resulting values
//! (non-empty identification, a well-formed service URL, at least one
//! provider per resource, and so on). The full rule set is evaluated with no
//! short-circuiting, so the caller can report everything at once before
//! gating a save.

use crate::document::ConfigDocument;
use crate::value::dotted;

impl ConfigDocument {
    /// Dotted paths of every field violating a business rule.
    pub fn invalid_fields(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        for field in self.server.invalid_fields() {
            invalid.push(dotted("server", &field));
        }
        for field in self.metadata.invalid_fields() {
            invalid.push(dotted("metadata", &field));
        }
        for (name, resource) in &self.resources {
            let prefix = dotted("resources", name);
            for field in resource.invalid_fields() {
                invalid.push(dotted(&prefix, &field));
            }
        }
        invalid
    }
}
