//! Error types for the traceguard redaction pipeline.
//!
//! Two families matter here: configuration errors, which are surfaced at
//! pipeline construction and are fatal to building that pipeline, and
//! recognizer errors, which are recovered locally by disabling the entity
//! layer and never reach a caller of `apply`.

use std::time::Duration;
use thiserror::Error;

/// The main error type for traceguard operations.
#[derive(Debug, Error)]
pub enum TraceguardError {
    /// A redaction configuration error occurred.
    #[error("{0}")]
    Redaction(#[from] RedactionError),

    /// An entity recognizer error occurred.
    #[error("{0}")]
    Recognizer(#[from] RecognizerError),
}

/// Configuration errors raised while building a redaction pipeline.
///
/// These are fail-fast: a pipeline with a malformed rule or an unknown
/// entity kind is never constructed.
#[derive(Debug, Error)]
pub enum RedactionError {
    /// A rule's pattern failed to compile.
    #[error("invalid pattern for rule `{name}`: {source}")]
    InvalidPattern {
        /// The name of the offending rule.
        name: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A rule was declared without a replacement label.
    #[error("rule `{0}` has an empty label")]
    EmptyLabel(String),

    /// An entity kind name from configuration is not recognized.
    #[error("unsupported entity kind `{0}`")]
    UnsupportedEntityKind(String),
}

/// Errors reported by the entity recognition layer.
///
/// Any of these moves the detector to its disabled state; none of them
/// propagate to request handling.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// The model artifact is not installed or cannot be found.
    #[error("model artifact missing: {0}")]
    ArtifactMissing(String),

    /// The model artifact exists but failed to load.
    #[error("model load failed: {0}")]
    LoadFailed(String),

    /// The model load did not finish within the provider's bound.
    #[error("model load timed out after {0:?}")]
    LoadTimeout(Duration),

    /// Detection failed on a particular input.
    #[error("entity detection failed: {0}")]
    Inference(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_error_converts_to_traceguard_error() {
        let err: TraceguardError = RedactionError::EmptyLabel("email".to_string()).into();
        assert!(matches!(err, TraceguardError::Redaction(_)));
        assert_eq!(err.to_string(), "rule `email` has an empty label");
    }

    #[test]
    fn recognizer_error_messages_name_the_failure() {
        let err = RecognizerError::ArtifactMissing("en_core_web_lg".to_string());
        assert!(err.to_string().contains("en_core_web_lg"));

        let err = RecognizerError::LoadTimeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"));
    }
}
