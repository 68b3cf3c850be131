//! Building blocks shared by the typed schema tree: the flow-list marker
//! type, localized-text unions, and scalar coercion primitives.
//!
//! The untyped side of the world is `serde_yaml::Value`: the generic tree of
//! mappings, sequences, scalars and nulls that the external document
//! reader/writer produces and consumes. Everything in this module exists to
//! move data between that tree and the typed one without losing information
//! the round-trip contract cares about (insertion order, the int/float
//! distinction, unknown blobs).

use serde_yaml::{Mapping, Number, Value};

/// Fallback bounding box substituted when input cannot be coerced.
pub const DEFAULT_BBOX: [i64; 4] = [-180, -90, 180, 90];

/// Join a field name onto a dotted diagnostic path.
pub(crate) fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Bracketed form for sequence positions: `links[2]`.
pub(crate) fn indexed(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

/// A list tagged for single-line (flow-style) textual serialization.
///
/// The tag lives in the typed tree: a field being `FlowList`-typed is what
/// tells the external emitter to write it on one line. The emitted generic
/// value is a plain sequence; [`FlowList::emit`] and the merge path both
/// preserve element scalars verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowList(Vec<Value>);

impl FlowList {
    pub fn new(items: Vec<Value>) -> Self {
        FlowList(items)
    }

    /// Build a flow list of strings. Convenience for defaults and tests.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FlowList(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Split a comma-separated line into a flow list of strings.
    ///
    /// This is the inverse of how the flat-list edit surface renders string
    /// flow lists; it is not used when merging documents (a document-side
    /// flow list is always a real sequence).
    pub fn from_joined(text: &str) -> Self {
        if text.trim().is_empty() {
            return FlowList::default();
        }
        FlowList(
            text.split(',')
                .map(|part| Value::String(part.trim().to_string()))
                .collect(),
        )
    }

    pub fn items(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn emit(&self) -> Value {
        Value::Sequence(self.0.clone())
    }
}

/// The default bbox as a flow list of integers.
pub fn default_bbox() -> FlowList {
    FlowList(DEFAULT_BBOX.iter().map(|n| Value::from(*n)).collect())
}

/// Coerce a raw value into a bbox flow list.
///
/// The sequence must have exactly 4 or 6 entries and every entry must be
/// numeric or a numeric string. Returns `None` otherwise; the caller
/// substitutes [`default_bbox`] and records a wrong-type diagnostic.
pub fn coerce_bbox(raw: &Value) -> Option<FlowList> {
    let seq = raw.as_sequence()?;
    if seq.len() != 4 && seq.len() != 6 {
        return None;
    }
    let mut items = Vec::with_capacity(seq.len());
    for entry in seq {
        items.push(numeric_scalar(entry)?);
    }
    Some(FlowList(items))
}

/// Coerce a scalar to a number, preserving the int/float distinction.
///
/// Numbers pass through unchanged. Integral-looking strings become integers
/// and decimal-looking strings become floats. A document saying `"10"` must
/// not come back as `10.0`.
pub fn numeric_scalar(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                return Some(Value::Number(Number::from(i)));
            }
            text.parse::<f64>()
                .ok()
                .map(|f| Value::Number(Number::from(f)))
        }
        _ => None,
    }
}

/// Free text that is either a plain string or a locale-keyed mapping of
/// strings (or lists of strings). Titles and descriptions use this.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalizedText {
    Plain(String),
    Localized(Mapping),
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

impl LocalizedText {
    pub fn plain(text: impl Into<String>) -> Self {
        LocalizedText::Plain(text.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LocalizedText::Plain(s) => s.is_empty(),
            LocalizedText::Localized(m) => m.is_empty(),
        }
    }

    pub(crate) fn emit(&self) -> Value {
        match self {
            LocalizedText::Plain(s) => Value::String(s.clone()),
            LocalizedText::Localized(m) => Value::Mapping(m.clone()),
        }
    }
}

/// Keyword sets: a plain list, or a locale-keyed mapping of lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Keywords {
    List(Vec<Value>),
    Localized(Mapping),
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::List(Vec::new())
    }
}

impl Keywords {
    pub fn is_empty(&self) -> bool {
        match self {
            Keywords::List(items) => items.is_empty(),
            Keywords::Localized(m) => m.is_empty(),
        }
    }

    pub(crate) fn emit(&self) -> Value {
        match self {
            Keywords::List(items) => Value::Sequence(items.clone()),
            Keywords::Localized(m) => Value::Mapping(m.clone()),
        }
    }
}
