//! Transform capability interfaces.
//!
//! Redaction strategies (pattern-only, pattern+entity, identity) are
//! interchangeable implementations of these two traits rather than ad hoc
//! callables, so call sites never care which strategy is active.

use crate::payload::Payload;

/// A total transform over a single string.
///
/// Implementations must be infallible: a transform that cannot improve its
/// input returns it unchanged.
pub trait TextTransform: Send + Sync {
    /// Applies the transform to `text`, returning the rewritten string.
    fn apply(&self, text: &str) -> String;
}

/// A total transform over a whole payload tree.
///
/// Implementations must preserve the tree's shape: key sets, sequence
/// lengths and order, and non-text scalar types all survive.
pub trait PayloadTransform: Send + Sync {
    /// Transforms `payload`, returning the rewritten tree.
    fn transform(&self, payload: Payload) -> Payload;
}

/// The identity transform. Used when redaction is toggled off.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl TextTransform for IdentityTransform {
    fn apply(&self, text: &str) -> String {
        text.to_string()
    }
}

impl PayloadTransform for IdentityTransform {
    fn transform(&self, payload: Payload) -> Payload {
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn identity_leaves_text_alone() {
        assert_eq!(IdentityTransform.apply("leia@rebelalliance.org"), "leia@rebelalliance.org");
    }

    #[test]
    fn identity_leaves_payloads_alone() {
        let payload = Payload::from(json!({"ssn": "000-66-5678"}));
        assert_eq!(IdentityTransform.transform(payload.clone()), payload);
    }
}
