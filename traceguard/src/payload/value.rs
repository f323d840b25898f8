//! The payload value model.
//!
//! Telemetry payloads arrive as arbitrary trees without a fixed schema.
//! Rather than inspecting `serde_json::Value` variants at every call site,
//! the pipeline works on an explicit tagged variant so the walker can
//! pattern-match the tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An untyped telemetry payload value.
///
/// One of: a text scalar, a non-text scalar (number, boolean, null), an
/// ordered sequence, or a string-keyed mapping. Redaction only ever rewrites
/// the content of [`Payload::Text`] leaves; every other variant passes
/// through structurally unchanged.
///
/// The variant set is closed over the JSON data model, so any payload that
/// deserializes is representable and traversal is total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// The null scalar.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(serde_json::Number),
    /// A text scalar. The only variant redaction may rewrite.
    Text(String),
    /// An ordered sequence of payloads.
    Sequence(Vec<Payload>),
    /// A mapping from string keys to payloads.
    Mapping(BTreeMap<String, Payload>),
}

impl Payload {
    /// Creates a text payload.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text content if this is a text scalar.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this payload is a scalar (not a container).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Payload> for serde_json::Value {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Null => Self::Null,
            Payload::Bool(b) => Self::Bool(b),
            Payload::Number(n) => Self::Number(n),
            Payload::Text(s) => Self::String(s),
            Payload::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Payload::Mapping(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
