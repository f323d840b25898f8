//! The two-layer PII redaction pipeline.
//!
//! A deterministic pattern layer catches structured PII (emails, SSNs,
//! phone and card numbers); a probabilistic entity layer catches
//! unstructured PII (names, locations) behind a lazily loaded model that
//! degrades to pass-through if unavailable.

mod detector;
mod entity;
mod pattern;
mod pipeline;
mod rules;
mod transform;

pub use detector::{DetectorState, EntityRedactor};
pub use entity::{EntityKind, EntityRecognizer, EntitySpan, RecognizerProvider};
pub use pattern::PatternRedactor;
pub use pipeline::{RedactionPipeline, RedactionPipelineBuilder};
pub use rules::{default_rules, RedactionRule};
pub use transform::{IdentityTransform, PayloadTransform, TextTransform};
