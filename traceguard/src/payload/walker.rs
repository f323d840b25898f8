//! Shape-preserving traversal over payload trees.

use crate::payload::Payload;
use crate::redact::TextTransform;

/// Applies `transform` to every text leaf of `payload`, rebuilding the tree
/// with its shape unchanged.
///
/// Sequences keep their length and order, mappings keep their key set, and
/// non-text scalars are returned as-is. Mapping keys are never transformed:
/// values are assumed to carry the PII. A key name that itself contains PII
/// would escape this traversal.
///
/// Total for any well-formed payload; transform failures are the
/// transform's responsibility (the [`TextTransform`] contract is
/// infallible).
#[must_use]
pub fn walk(payload: Payload, transform: &dyn TextTransform) -> Payload {
    match payload {
        Payload::Text(text) => Payload::Text(transform.apply(&text)),
        Payload::Sequence(items) => Payload::Sequence(
            items
                .into_iter()
                .map(|item| walk(item, transform))
                .collect(),
        ),
        Payload::Mapping(entries) => Payload::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, walk(value, transform)))
                .collect(),
        ),
        scalar @ (Payload::Null | Payload::Bool(_) | Payload::Number(_)) => scalar,
    }
}
