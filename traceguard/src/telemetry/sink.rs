//! Telemetry sink trait and implementations.
//!
//! The sink is the outbound boundary: it receives an already-redacted
//! payload plus its request-scoped metadata. Real transports (trace
//! ingestion services) live outside this crate behind this trait.

use crate::payload::Payload;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::info;

/// Trait for telemetry sinks that receive exported payloads.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Submits a payload and its metadata asynchronously.
    async fn submit(&self, payload: Payload, metadata: HashMap<String, serde_json::Value>);
}

/// A sink that discards everything.
///
/// Used as the default when no transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

#[async_trait]
impl TelemetrySink for NoOpSink {
    async fn submit(&self, _payload: Payload, _metadata: HashMap<String, serde_json::Value>) {
        // Intentionally empty - discards all payloads
    }
}

/// A sink that logs submissions through the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

#[async_trait]
impl TelemetrySink for LoggingSink {
    async fn submit(&self, payload: Payload, metadata: HashMap<String, serde_json::Value>) {
        let payload: serde_json::Value = payload.into();
        info!(
            payload = %payload,
            metadata = ?metadata,
            "telemetry payload exported"
        );
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingSink {
    submissions: parking_lot::RwLock<Vec<(Payload, HashMap<String, serde_json::Value>)>>,
}

impl CollectingSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything submitted so far.
    #[must_use]
    pub fn submissions(&self) -> Vec<(Payload, HashMap<String, serde_json::Value>)> {
        self.submissions.read().clone()
    }

    /// Returns the number of submissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.submissions.read().len()
    }

    /// Returns true if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submissions.read().is_empty()
    }
}

#[async_trait]
impl TelemetrySink for CollectingSink {
    async fn submit(&self, payload: Payload, metadata: HashMap<String, serde_json::Value>) {
        self.submissions.write().push((payload, metadata));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn collecting_sink_records_submissions() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        let payload = Payload::from(json!({"ok": true}));
        sink.submit(payload.clone(), HashMap::new()).await;

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.submissions()[0].0, payload);
    }

    #[tokio::test]
    async fn noop_sink_accepts_anything() {
        NoOpSink.submit(Payload::Null, HashMap::new()).await;
    }
}
