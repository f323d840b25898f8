//! Pattern rule declarations.

use serde::{Deserialize, Serialize};

/// An ordered pattern-to-label rule for structured PII.
///
/// Rule order is significant: rules run in declaration order and a later
/// rule sees text already rewritten by earlier ones. Labels inserted by
/// earlier rules must therefore never themselves match a later rule's
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionRule {
    /// A short name for diagnostics (e.g. `"email"`).
    pub name: String,
    /// The regex source to match against.
    pub pattern: String,
    /// The replacement label (e.g. `"<EMAIL>"`).
    pub label: String,
}

impl RedactionRule {
    /// Creates a new rule.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// The built-in structured-PII policy.
///
/// Email, SSN-style identifier, North American phone number (optional
/// country code and separator variants), 16-digit card number with optional
/// grouping, and internal account identifiers.
#[must_use]
pub fn default_rules() -> Vec<RedactionRule> {
    vec![
        RedactionRule::new(
            "email",
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            "<EMAIL>",
        ),
        RedactionRule::new("ssn", r"\b\d{3}-\d{2}-\d{4}\b", "<SSN>"),
        RedactionRule::new(
            "phone",
            r"\b(?:\+1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
            "<PHONE>",
        ),
        RedactionRule::new(
            "credit_card",
            r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
            "<CREDIT_CARD>",
        ),
        RedactionRule::new("account_id", r"\bACT-\d{4,6}\b", "<ACCOUNT_ID>"),
    ]
}
