use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A result row as it arrives from the backend.
///
/// The server emits `[word, definition]` pairs, but older endpoints and
/// hand-edited fixtures use `{ "word": .., "definition": .. }` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireEntry {
    Pair(Vec<Value>),
    Record {
        #[serde(default)]
        word: Option<Value>,
        #[serde(default)]
        definition: Option<Value>,
    },
    Other(Value),
}

/// Canonical dictionary entry used by every component past the wire boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub headword: String,
    pub definition: String,
}

impl Entry {
    pub fn new(headword: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            definition: definition.into(),
        }
    }

    /// Normalize a wire row.
    ///
    /// Returns `Ok(None)` when both fields are absent or null; such rows are
    /// skipped without noise. Non-string scalars are coerced to their string form.
    pub fn from_wire(wire: &WireEntry) -> Result<Option<Self>, EntryError> {
        let (word, definition) = match wire {
            WireEntry::Pair(items) => {
                if items.is_empty() {
                    return Err(EntryError::EmptyPair);
                }
                (
                    items.first().and_then(coerce_text),
                    items.get(1).and_then(coerce_text),
                )
            }
            WireEntry::Record { word, definition } => (
                word.as_ref().and_then(coerce_text),
                definition.as_ref().and_then(coerce_text),
            ),
            WireEntry::Other(Value::Null) => return Ok(None),
            WireEntry::Other(value) => {
                return Err(EntryError::UnexpectedShape(value_kind(value)));
            }
        };

        if word.is_none() && definition.is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            headword: word.unwrap_or_default(),
            definition: definition.unwrap_or_default(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("entry pair has no elements")]
    EmptyPair,

    #[error("unexpected entry shape: {0}")]
    UnexpectedShape(&'static str),
}

/// String form of a JSON value; `None` for null.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
