//! Entity kinds, detected spans, and the recognizer seam.
//!
//! The NLP engine that produces spans is an external collaborator; this
//! module defines the traits it plugs in behind and the pure routine that
//! turns a set of detected spans into a rewritten string.

use crate::errors::{RecognizerError, RedactionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A semantically typed region of free text.
///
/// Kinds form an open enumeration: the known variants cover the types the
/// built-in policy acts on, and anything else a recognizer reports arrives
/// as [`EntityKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A person's name.
    Person,
    /// A geographic location or address.
    Location,
    /// An organization name.
    Organization,
    /// A date or time expression.
    DateTime,
    /// A phone number caught linguistically rather than by pattern.
    Phone,
    /// An email address caught linguistically rather than by pattern.
    Email,
    /// A Social Security-style identifier.
    Ssn,
    /// A payment card number.
    CreditCard,
    /// Any kind outside the known set, carried verbatim.
    Other(String),
}

impl EntityKind {
    /// The canonical uppercase name, e.g. `"PERSON"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::Organization => "ORGANIZATION",
            Self::DateTime => "DATE_TIME",
            Self::Phone => "PHONE_NUMBER",
            Self::Email => "EMAIL_ADDRESS",
            Self::Ssn => "US_SSN",
            Self::CreditCard => "CREDIT_CARD",
            Self::Other(name) => name,
        }
    }

    /// The replacement label, e.g. `"<PERSON>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("<{}>", self.as_str())
    }

    /// Parses a recognizer-reported kind name. Never fails: unknown names
    /// become [`EntityKind::Other`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let canonical = name.trim().to_uppercase();
        match canonical.as_str() {
            "PERSON" => Self::Person,
            "LOCATION" => Self::Location,
            "ORGANIZATION" => Self::Organization,
            "DATE_TIME" => Self::DateTime,
            "PHONE_NUMBER" => Self::Phone,
            "EMAIL_ADDRESS" => Self::Email,
            "US_SSN" => Self::Ssn,
            "CREDIT_CARD" => Self::CreditCard,
            _ => Self::Other(canonical),
        }
    }

    /// Parses a kind name from configuration.
    ///
    /// Unlike [`EntityKind::parse`], a name outside the known set is a
    /// configuration error: asking the pipeline to act on a kind it cannot
    /// name is fail-fast, not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RedactionError::UnsupportedEntityKind`] for unknown names.
    pub fn from_config(name: &str) -> Result<Self, RedactionError> {
        match Self::parse(name) {
            Self::Other(unknown) => Err(RedactionError::UnsupportedEntityKind(unknown)),
            known => Ok(known),
        }
    }

    /// The default set of kinds the pipeline acts on.
    #[must_use]
    pub fn default_detection_set() -> HashSet<Self> {
        HashSet::from([
            Self::Person,
            Self::Phone,
            Self::Email,
            Self::Ssn,
            Self::CreditCard,
            Self::Location,
        ])
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected entity span over a post-pattern-redaction string.
///
/// Offsets are byte offsets into the analyzed string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// The detected kind.
    pub kind: EntityKind,
    /// Detection confidence in `[0.0, 1.0]`.
    pub score: f32,
}

impl EntitySpan {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize, kind: EntityKind, score: f32) -> Self {
        Self {
            start,
            end,
            kind,
            score,
        }
    }

    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Trait for entity recognition engines.
///
/// Implementations wrap the underlying NLP model. Detection may fail; the
/// detector layer above treats any failure as terminal for the layer.
pub trait EntityRecognizer: Send + Sync {
    /// Detects entity spans in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`RecognizerError::Inference`] (or a wrapped engine error)
    /// when detection cannot complete.
    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

/// Trait for the expensive one-time acquisition of a recognizer.
///
/// `load` is called at most once per process by the detector. A provider
/// that wants a load timeout owns that bound itself and reports
/// [`RecognizerError::LoadTimeout`].
pub trait RecognizerProvider: Send + Sync {
    /// Loads the recognizer, verifying it is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`RecognizerError`] when the model artifact is missing or
    /// fails to load.
    fn load(&self) -> Result<Arc<dyn EntityRecognizer>, RecognizerError>;
}

/// Replaces detected spans in `text` with their kind labels.
///
/// Spans are filtered to the configured `kinds` and a minimum confidence,
/// then de-overlapped: the higher-confidence span wins, ties broken by
/// leftmost start, then longest span. The output is rebuilt in one pass so
/// earlier replacements never invalidate later offsets. Spans with offsets
/// that fall outside the text or off a character boundary are dropped.
#[must_use]
pub(crate) fn apply_spans(
    text: &str,
    spans: Vec<EntitySpan>,
    kinds: &HashSet<EntityKind>,
    min_score: f32,
) -> String {
    let mut candidates: Vec<EntitySpan> = spans
        .into_iter()
        .filter(|span| span.score >= min_score && kinds.contains(&span.kind))
        .filter(|span| {
            span.start < span.end && text.get(span.start..span.end).is_some()
        })
        .collect();
    if candidates.is_empty() {
        return text.to_string();
    }

    // Winner-takes-overlap selection.
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| b.len().cmp(&a.len()))
    });
    let mut selected: Vec<EntitySpan> = Vec::with_capacity(candidates.len());
    for span in candidates {
        if !selected.iter().any(|kept| kept.overlaps(&span)) {
            selected.push(span);
        }
    }
    selected.sort_by_key(|span| span.start);

    let mut rebuilt = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in &selected {
        rebuilt.push_str(&text[cursor..span.start]);
        rebuilt.push_str(&span.kind.label());
        cursor = span.end;
    }
    rebuilt.push_str(&text[cursor..]);
    rebuilt
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn person_set() -> HashSet<EntityKind> {
        HashSet::from([EntityKind::Person, EntityKind::Location])
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(EntityKind::parse("person"), EntityKind::Person);
        assert_eq!(EntityKind::parse(" Email_Address "), EntityKind::Email);
        assert_eq!(
            EntityKind::parse("iban_code"),
            EntityKind::Other("IBAN_CODE".to_string())
        );
    }

    #[test]
    fn config_parse_rejects_unknown_kinds() {
        assert_eq!(
            EntityKind::from_config("PERSON").expect("known kind"),
            EntityKind::Person
        );
        let err = EntityKind::from_config("midichlorian_count").expect_err("unknown kind");
        assert_eq!(
            err.to_string(),
            "unsupported entity kind `MIDICHLORIAN_COUNT`"
        );
    }

    #[test]
    fn labels_wrap_the_canonical_name() {
        assert_eq!(EntityKind::Person.label(), "<PERSON>");
        assert_eq!(EntityKind::Ssn.label(), "<US_SSN>");
        assert_eq!(
            EntityKind::Other("IBAN_CODE".to_string()).label(),
            "<IBAN_CODE>"
        );
    }

    #[test]
    fn replaces_spans_without_invalidating_offsets() {
        let text = "Leia Organa lives on Alderaan";
        let spans = vec![
            EntitySpan::new(0, 11, EntityKind::Person, 0.9),
            EntitySpan::new(21, 29, EntityKind::Location, 0.8),
        ];
        assert_eq!(
            apply_spans(text, spans, &person_set(), 0.0),
            "<PERSON> lives on <LOCATION>"
        );
    }

    #[test]
    fn higher_confidence_span_wins_overlaps() {
        let text = "Han Solo Shipping";
        let spans = vec![
            EntitySpan::new(0, 8, EntityKind::Person, 0.6),
            EntitySpan::new(0, 17, EntityKind::Location, 0.9),
        ];
        assert_eq!(
            apply_spans(text, spans, &person_set(), 0.0),
            "<LOCATION>"
        );
    }

    #[test]
    fn overlap_ties_prefer_leftmost_then_longest() {
        let text = "ab cd ef";
        let leftmost = vec![
            EntitySpan::new(3, 8, EntityKind::Person, 0.5),
            EntitySpan::new(0, 5, EntityKind::Location, 0.5),
        ];
        assert_eq!(
            apply_spans(text, leftmost, &person_set(), 0.0),
            "<LOCATION> ef"
        );

        let longest = vec![
            EntitySpan::new(0, 2, EntityKind::Person, 0.5),
            EntitySpan::new(0, 5, EntityKind::Location, 0.5),
        ];
        assert_eq!(
            apply_spans(text, longest, &person_set(), 0.0),
            "<LOCATION> ef"
        );
    }

    #[test]
    fn filters_by_kind_and_confidence() {
        let text = "Leia visited Endor on Tuesday";
        let spans = vec![
            EntitySpan::new(0, 4, EntityKind::Person, 0.9),
            EntitySpan::new(13, 18, EntityKind::Location, 0.2),
            EntitySpan::new(22, 29, EntityKind::DateTime, 0.99),
        ];
        assert_eq!(
            apply_spans(text, spans, &person_set(), 0.5),
            "<PERSON> visited Endor on Tuesday"
        );
    }

    #[test]
    fn drops_spans_with_invalid_offsets() {
        let text = "short";
        let spans = vec![
            EntitySpan::new(0, 50, EntityKind::Person, 0.9),
            EntitySpan::new(3, 2, EntityKind::Person, 0.9),
        ];
        assert_eq!(apply_spans(text, spans, &person_set(), 0.0), "short");
    }

    #[test]
    fn drops_spans_off_char_boundaries() {
        let text = "café visit";
        // Byte 4 is inside the two-byte 'é'.
        let spans = vec![EntitySpan::new(0, 4, EntityKind::Person, 0.9)];
        assert_eq!(apply_spans(text, spans, &person_set(), 0.0), "café visit");
    }

    #[test]
    fn empty_span_list_is_identity() {
        assert_eq!(apply_spans("text", vec![], &person_set(), 0.0), "text");
    }
}
