//! # Traceguard
//!
//! A PII redaction pipeline for agent telemetry payloads.
//!
//! Traceguard transforms arbitrary, deeply nested telemetry payloads so
//! that no personally identifiable information survives in them, while
//! preserving their structural fidelity:
//!
//! - **Pattern layer**: deterministic regex rules for structured PII
//!   (emails, SSNs, phone and card numbers, account ids)
//! - **Entity layer**: probabilistic named-entity detection for
//!   unstructured PII (names, locations), lazily loaded and degrading to
//!   pass-through if the model is unavailable
//! - **Shape-preserving traversal**: key sets, sequence order, and
//!   non-text scalars all survive redaction unchanged
//! - **Per-request configuration**: a mode toggle and a session-stable
//!   conversation id attached to every export as metadata
//!
//! ## Quick Start
//!
//! ```rust
//! use traceguard::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), traceguard::errors::RedactionError> {
//! let pipeline = Arc::new(RedactionPipeline::pattern_only()?);
//! let settings = TracingSettings::new(pipeline);
//!
//! let session = Session::new();
//! let config = settings.build(true, session.conversation_id());
//!
//! let payload = Payload::text("reach me at leia.organa@rebelalliance.org");
//! let redacted = config.transform().transform(payload);
//! assert_eq!(redacted.as_text(), Some("reach me at <EMAIL>"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod payload;
pub mod redact;
pub mod session;
pub mod telemetry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{RecognizerError, RedactionError, TraceguardError};
    pub use crate::payload::{walk, Payload};
    pub use crate::redact::{
        default_rules, DetectorState, EntityKind, EntityRecognizer, EntityRedactor,
        EntitySpan, IdentityTransform, PatternRedactor, PayloadTransform,
        RecognizerProvider, RedactionPipeline, RedactionPipelineBuilder, RedactionRule,
        TextTransform,
    };
    pub use crate::session::{
        ConversationId, ExportConfig, RedactionMode, Session, TracingSettings,
    };
    pub use crate::telemetry::{LoggingSink, NoOpSink, TelemetrySink};
}

#[cfg(test)]
mod tests {
    #[test]
    fn library_compiles() {
        assert!(true);
    }
}
