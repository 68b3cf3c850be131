//! Schema-directed editing core for geospatial service configuration
//! documents. Load a document into a typed tree, edit it, and write it back
//! without losing anything you didn't touch.
//!
//! ```ignore
//! let (mut document, diagnostics) = geocfg::file::load(path)?;
//! // ... edit through the typed tree ...
//! if document.invalid_fields().is_empty() {
//!     geocfg::file::save(path, &document)?;
//! }
//! ```
//!
//! # The problem
//!
//! A service configuration document is authored by hand, validated loosely,
//! and edited through a form UI. The editor must accept whatever is in the
//! file — half-filled sections, misspelled enum values, provider shapes from
//! a newer service version — present a fully populated form anyway, and save
//! a document that still contains everything the file had. Rejecting input
//! loses user data; silently "fixing" it corrupts documents.
//!
//! # Design: reconciliation, not deserialization
//!
//! Geocfg never deserializes the document into the typed tree directly.
//! Instead, a load is one **reconciliation pass**
//! ([`ConfigDocument::apply`]): the untyped tree from the file is merged into
//! a default-constructed typed tree, field by field, against a hand-written
//! per-record schema. The pass is total: it cannot fail and cannot panic on
//! input data. Every field that cannot be filled keeps its default and
//! leaves a trace in the returned [`Diagnostics`]:
//!
//! - **missing**: a mandatory field was absent. The default stands.
//! - **wrong type**: a value was present but structurally incompatible with
//!   every declared alternative. The value is discarded, the default stands.
//!
//! Optional fields are genuinely optional: omitting them produces no
//! diagnostic at all. The caller decides what the diagnostics mean — the
//! engine itself never refuses to load and never refuses to serialize.
//!
//! # Providers: a closed set plus everything else
//!
//! Each resource exposes data through a list of providers, dispatched on
//! their `type` discriminant into a closed set of known shapes (postgresql
//! feature, MVT tile proxy, WMS map facade). A provider matching no known
//! shape is **not** an error: it is carried as an opaque blob and re-emitted
//! verbatim, so documents written for newer service versions survive the
//! editor untouched. Known shapes also define a fixed-arity positional
//! pack/unpack contract for the flat-list edit surface; that format is
//! internal, so a malformed flat list is a hard [`GeocfgError`], not a
//! diagnostic.
//!
//! # Round-trip contract
//!
//! Saving re-emits the typed tree ([`ConfigDocument::to_value`]). The
//! [`diff`](diff::diff) module is the correctness oracle for the cycle:
//! mapping key order is ignored, sequence order matters, and after
//! [`without_flagged`](diff::DiffReport::without_flagged) filters the paths
//! already reported on load, a lossy diff means a bug. The only value
//! changes a cycle may introduce are the declared normalizations (bbox
//! numeric coercion, enum canonical strings) plus defaults materializing as
//! additions.
//!
//! The int/float distinction is part of the contract: a bbox written as
//! `["10", "20.5", "30", "40"]` reconciles to `[10, 20.5, 30, 40]` with each
//! element keeping its numeric kind.
//!
//! # Validation is separate from reconciliation
//!
//! [`ConfigDocument::invalid_fields`] evaluates the business rules (required
//! text present, URL well-formed, at least one provider per resource, bbox
//! arity) over the reconciled tree and returns every violated dotted path at
//! once. It gates saving in the host UI but is independent of the load
//! diagnostics: a document can load clean and still be invalid, or load with
//! a page of diagnostics and validate fine after editing.
//!
//! # CLI
//!
//! The `cli` feature (on by default) ships a `geocfg` binary that runs the
//! same checks from the command line, with `--json` for tooling and
//! `--round-trip` to verify a load/save cycle against the diff oracle.

pub mod diagnostics;
pub mod diff;
pub mod document;
pub mod error;
pub mod file;
pub mod logging;
pub mod metadata;
pub mod provider;
pub mod records;
pub mod resource;
pub mod server;
pub mod value;

pub(crate) mod merge;
mod validate;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
mod fixtures;

pub use diagnostics::Diagnostics;
pub use document::ConfigDocument;
pub use error::GeocfgError;
pub use provider::Provider;
pub use records::{ProviderKind, StringEnum};
pub use resource::Resource;
pub use value::FlowList;
