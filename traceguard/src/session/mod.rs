//! Session identity and per-request tracing configuration.

mod config;
mod identity;

pub use config::{ExportConfig, RedactionMode, TracingSettings};
pub use identity::{ConversationId, Session};
