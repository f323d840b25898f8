//! Per-request telemetry export configuration.
//!
//! Each inbound request builds one of these against the current redaction
//! toggle. The config carries the payload transform the telemetry client
//! must apply plus the comparison metadata (mode tag, conversation id), so
//! traces can be filtered by mode downstream even when redaction is off.

use crate::redact::{IdentityTransform, PayloadTransform, RedactionPipeline};
use crate::session::identity::ConversationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Whether redaction was active for a request.
///
/// Attached to outgoing telemetry as metadata, never encoded in the
/// payload content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionMode {
    /// Payloads are redacted before export.
    On,
    /// Payloads leave unmodified (for comparison runs only).
    Off,
}

impl RedactionMode {
    /// The metadata tag value, `"on"` or `"off"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl From<bool> for RedactionMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::On
        } else {
            Self::Off
        }
    }
}

/// Process-wide settings the per-request configs are built from.
///
/// Holds the (shared, immutable) pipeline and the telemetry project name.
/// Building a config reads the toggle per call, so flipping it takes
/// effect on the very next request.
#[derive(Debug, Clone)]
pub struct TracingSettings {
    pipeline: Arc<RedactionPipeline>,
    project: String,
}

impl TracingSettings {
    /// Default telemetry project name.
    pub const DEFAULT_PROJECT: &'static str = "compliance-demo";

    /// Creates settings around a shared pipeline.
    #[must_use]
    pub fn new(pipeline: Arc<RedactionPipeline>) -> Self {
        Self {
            pipeline,
            project: Self::DEFAULT_PROJECT.to_string(),
        }
    }

    /// Sets the telemetry project name.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Builds the export config for one request.
    ///
    /// When `redaction_enabled` is true the config carries the pipeline's
    /// transform; when false it carries the identity transform. Metadata
    /// (mode tag, conversation id, project) is carried either way.
    #[must_use]
    pub fn build(&self, redaction_enabled: bool, conversation_id: ConversationId) -> ExportConfig {
        let transform: Arc<dyn PayloadTransform> = if redaction_enabled {
            Arc::clone(&self.pipeline) as Arc<dyn PayloadTransform>
        } else {
            Arc::new(IdentityTransform)
        };
        ExportConfig {
            transform,
            mode: RedactionMode::from(redaction_enabled),
            conversation_id,
            project: self.project.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Immutable per-request export configuration.
///
/// Owned solely by the request that built it; nothing here mutates
/// process-wide state.
#[derive(Clone)]
pub struct ExportConfig {
    transform: Arc<dyn PayloadTransform>,
    mode: RedactionMode,
    conversation_id: ConversationId,
    project: String,
    created_at: DateTime<Utc>,
}

impl ExportConfig {
    /// The payload transform the telemetry client must apply before
    /// anything leaves the process.
    #[must_use]
    pub fn transform(&self) -> &Arc<dyn PayloadTransform> {
        &self.transform
    }

    /// The redaction mode tag.
    #[must_use]
    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    /// The conversation id grouping this request with its session.
    #[must_use]
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    /// The telemetry project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Renders the request-scoped metadata attached alongside (not inside)
    /// the exported payload.
    #[must_use]
    pub fn metadata(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert(
            "redaction_mode".to_string(),
            serde_json::Value::String(self.mode.as_str().to_string()),
        );
        map.insert(
            "thread_id".to_string(),
            serde_json::Value::String(self.conversation_id.to_string()),
        );
        map.insert(
            "project".to_string(),
            serde_json::Value::String(self.project.clone()),
        );
        map.insert(
            "created_at".to_string(),
            serde_json::Value::String(
                self.created_at
                    .format("%Y-%m-%dT%H:%M:%S%.6f+00:00")
                    .to_string(),
            ),
        );
        map
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("mode", &self.mode)
            .field("conversation_id", &self.conversation_id)
            .field("project", &self.project)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
