//! Conversation identity for grouping a session's requests.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An opaque, collision-resistant identifier grouping one session's
/// requests into a single reviewable conversation.
///
/// Minted once per session and never mutated afterwards. Uniqueness is not
/// safety-critical (the worst case is two conversations merged in a review
/// UI), so standard randomized-identifier collision odds are acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Mints a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

/// Session-scoped state owned by the chat/session layer.
///
/// The session owns its conversation id: created at session start (lazily,
/// on first request), reused for every request, discarded with the session.
#[derive(Debug, Default)]
pub struct Session {
    conversation: Mutex<Option<ConversationId>>,
}

impl Session {
    /// Creates a session with no conversation id yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this session's conversation id, minting it on first call.
    ///
    /// Idempotent: every subsequent call returns the same value.
    #[must_use]
    pub fn conversation_id(&self) -> ConversationId {
        self.conversation
            .lock()
            .get_or_insert_with(ConversationId::generate)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn conversation_id_is_stable_within_a_session() {
        let session = Session::new();
        let first = session.conversation_id();
        let second = session.conversation_id();
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_sessions_get_distinct_ids() {
        let a = Session::new().conversation_id();
        let b = Session::new().conversation_id();
        assert_ne!(a, b);
    }

    #[test]
    fn id_round_trips_through_serde() {
        let id = ConversationId::generate();
        let rendered = serde_json::to_string(&id).expect("serialize");
        assert_eq!(rendered, format!("\"{id}\""));
        let back: ConversationId = serde_json::from_str(&rendered).expect("deserialize");
        assert_eq!(back, id);
    }
}
