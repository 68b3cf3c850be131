//! The reconciliation engine: in-place merge of an untyped mapping into the
//! typed schema tree.
//!
//! Every record in the tree implements [`Section`]: a hand-written field walk
//! built from the helpers below, one call per field. The helpers encode the
//! engine's contract:
//!
//! - **Total.** Merging never fails and never panics on input data. A value
//!   that cannot be applied is discarded; the field keeps its default and the
//!   problem is recorded in [`Diagnostics`].
//! - **Mandatory vs optional.** A non-`Option` field absent from the input
//!   records a missing-field path. An `Option` field absent from the input is
//!   silently left alone; an explicit null clears it.
//! - **Paths.** Nested records qualify diagnostic paths with dots, sequence
//!   elements with brackets, so every entry points at one document location.
//!
//! The symmetric direction, [`Section::emit`], rebuilds the untyped mapping
//! from the typed record. Optional fields that are absent are omitted from
//! the output entirely, mirroring how the original document left them out.

use serde_yaml::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::records::StringEnum;
use crate::value::{
    FlowList, Keywords, LocalizedText, coerce_bbox, default_bbox, dotted, indexed,
};

/// One record of the typed schema tree.
pub(crate) trait Section: Default {
    /// Merge fields from `raw` into `self`, qualifying diagnostics with `path`.
    fn merge_fields(&mut self, raw: &Mapping, path: &str, diag: &mut Diagnostics);

    /// Emit the record as an untyped mapping. Absent optionals are omitted.
    fn emit(&self) -> Mapping;
}

pub(crate) fn merge_string(
    field: &mut String,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::String(s)) => *field = s.clone(),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_string(
    field: &mut Option<String>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::String(s)) => *field = Some(s.clone()),
        Some(Value::Null) => *field = None,
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_bool(
    field: &mut bool,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::Bool(b)) => *field = *b,
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_int(
    field: &mut i64,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(value) => match value.as_i64() {
            Some(i) => *field = i,
            None => diag.push_wrong_type(dotted(path, key)),
        },
    }
}

pub(crate) fn merge_opt_int(
    field: &mut Option<i64>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(value) => match value.as_i64() {
            Some(i) => *field = Some(i),
            None => diag.push_wrong_type(dotted(path, key)),
        },
    }
}

pub(crate) fn merge_enum<E: StringEnum>(
    field: &mut E,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::String(s)) => match E::from_text(s) {
            Some(member) => *field = member,
            None => diag.push_wrong_type(dotted(path, key)),
        },
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_enum<E: StringEnum>(
    field: &mut Option<E>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(Value::String(s)) => match E::from_text(s) {
            Some(member) => *field = Some(member),
            None => diag.push_wrong_type(dotted(path, key)),
        },
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_nested<T: Section>(
    field: &mut T,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::Mapping(m)) => field.merge_fields(m, &dotted(path, key), diag),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_nested<T: Section>(
    field: &mut Option<T>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(Value::Mapping(m)) => field
            .get_or_insert_with(T::default)
            .merge_fields(m, &dotted(path, key), diag),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

/// Mandatory flow list of arbitrary scalars (e.g. a schema search path).
/// Only a real sequence is accepted from a document.
pub(crate) fn merge_flow_list(
    field: &mut FlowList,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::Sequence(items)) => *field = FlowList::new(items.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

/// Bounding-box flow list: 4 or 6 numeric entries, numeric strings coerced
/// per-element. Anything else falls back to the default bbox with a
/// wrong-type diagnostic.
pub(crate) fn merge_bbox(
    field: &mut FlowList,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(value) => match coerce_bbox(value) {
            Some(bbox) => *field = bbox,
            None => {
                *field = default_bbox();
                diag.push_wrong_type(dotted(path, key));
            }
        },
    }
}

pub(crate) fn merge_text(
    field: &mut LocalizedText,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::String(s)) => *field = LocalizedText::Plain(s.clone()),
        Some(Value::Mapping(m)) => *field = LocalizedText::Localized(m.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_keywords(
    field: &mut Keywords,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::Sequence(items)) => *field = Keywords::List(items.clone()),
        Some(Value::Mapping(m)) => *field = Keywords::Localized(m.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

/// Mandatory scalar union: a string or a number, kept verbatim.
pub(crate) fn merge_scalar(
    field: &mut Value,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(value @ (Value::String(_) | Value::Number(_))) => *field = value.clone(),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_scalar(
    field: &mut Option<Value>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(value @ (Value::String(_) | Value::Number(_))) => *field = Some(value.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

/// Mandatory plain list, elements kept verbatim.
pub(crate) fn merge_list(
    field: &mut Vec<Value>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => diag.push_missing(dotted(path, key)),
        Some(Value::Sequence(items)) => *field = items.clone(),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_list(
    field: &mut Option<Vec<Value>>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(Value::Sequence(items)) => *field = Some(items.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

pub(crate) fn merge_opt_mapping(
    field: &mut Option<Mapping>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(Value::Mapping(m)) => *field = Some(m.clone()),
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

/// Optional list of records. Mapping elements are merged into fresh defaults;
/// element sub-merges do not contribute to the load report. Non-mapping
/// elements are dropped with a wrong-type diagnostic at their position.
pub(crate) fn merge_opt_sections<T: Section>(
    field: &mut Option<Vec<T>>,
    raw: &Mapping,
    key: &str,
    path: &str,
    diag: &mut Diagnostics,
) {
    match raw.get(key) {
        None => {}
        Some(Value::Null) => *field = None,
        Some(Value::Sequence(items)) => {
            let list_path = dotted(path, key);
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Mapping(m) => {
                        let mut element = T::default();
                        let mut scratch = Diagnostics::new();
                        element.merge_fields(m, &indexed(&list_path, i), &mut scratch);
                        if !scratch.is_empty() {
                            tracing::debug!(
                                path = %indexed(&list_path, i),
                                dropped = scratch.len(),
                                "list element merged with defaults for unreadable fields"
                            );
                        }
                        out.push(element);
                    }
                    _ => diag.push_wrong_type(indexed(&list_path, i)),
                }
            }
            *field = Some(out);
        }
        Some(_) => diag.push_wrong_type(dotted(path, key)),
    }
}

// --- emission helpers ---

pub(crate) fn put(map: &mut Mapping, key: &str, value: Value) {
    map.insert(Value::String(key.to_string()), value);
}

pub(crate) fn put_opt(map: &mut Mapping, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        put(map, key, value);
    }
}
