//! The probabilistic entity layer and its lifecycle.
//!
//! The underlying model is expensive to load and may be absent entirely.
//! The detector owns an explicit state machine instead of a module-level
//! global: `Uninitialized -> Loading -> {Active | Disabled}`, with
//! `Disabled` terminal for the process lifetime. Whether the layer is
//! usable is a queryable fact, never a hidden exception path.

use crate::errors::RecognizerError;
use crate::redact::entity::{apply_spans, EntityKind, EntityRecognizer, RecognizerProvider};
use crate::redact::transform::TextTransform;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Observable lifecycle state of the entity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No call has reached the layer yet; the model is not loaded.
    Uninitialized,
    /// A first call is loading the model right now.
    Loading,
    /// The model loaded and detection is running.
    Active,
    /// Loading or detection failed; the layer is pass-through for the
    /// remaining process lifetime.
    Disabled,
}

/// Internal state cell. `Loading` has no variant here: it is the condition
/// of the mutex being held while the cell still reads `Uninitialized`.
enum LoadCell {
    Uninitialized,
    Active(Arc<dyn EntityRecognizer>),
    Disabled,
}

/// Unstructured-PII redaction backed by a lazily loaded recognizer.
///
/// The first call to [`EntityRedactor::apply`] triggers the model load;
/// concurrent first callers serialize on the state lock and share the one
/// load's outcome, so the load runs at most once per process. Any load or
/// detection failure permanently disables the layer, which then acts as the
/// identity transform. `apply` never fails and never blocks beyond the
/// single in-flight load.
pub struct EntityRedactor {
    provider: Box<dyn RecognizerProvider>,
    kinds: HashSet<EntityKind>,
    min_score: f32,
    cell: Mutex<LoadCell>,
}

impl EntityRedactor {
    /// Creates a detector over `provider`, acting on `kinds` at or above
    /// `min_score` confidence.
    #[must_use]
    pub fn new(
        provider: Box<dyn RecognizerProvider>,
        kinds: HashSet<EntityKind>,
        min_score: f32,
    ) -> Self {
        Self {
            provider,
            kinds,
            min_score,
            cell: Mutex::new(LoadCell::Uninitialized),
        }
    }

    /// Creates a detector with the default kind set and no confidence floor.
    #[must_use]
    pub fn with_defaults(provider: Box<dyn RecognizerProvider>) -> Self {
        Self::new(provider, EntityKind::default_detection_set(), 0.0)
    }

    /// Returns the current lifecycle state.
    ///
    /// Reports [`DetectorState::Loading`] when another caller holds the
    /// state lock mid-initialization.
    #[must_use]
    pub fn status(&self) -> DetectorState {
        match self.cell.try_lock() {
            None => DetectorState::Loading,
            Some(cell) => match &*cell {
                LoadCell::Uninitialized => DetectorState::Uninitialized,
                LoadCell::Active(_) => DetectorState::Active,
                LoadCell::Disabled => DetectorState::Disabled,
            },
        }
    }

    /// Returns true if the layer loaded its model and is detecting.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == DetectorState::Active
    }

    /// Detects and replaces entity spans in `text`.
    ///
    /// Identity when the layer is (or becomes) disabled. Never fails.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let Some(recognizer) = self.recognizer() else {
            return text.to_string();
        };
        match recognizer.recognize(text) {
            Ok(spans) => apply_spans(text, spans, &self.kinds, self.min_score),
            Err(error) => {
                self.disable("detection failed", &error);
                text.to_string()
            }
        }
    }

    /// Returns the loaded recognizer, performing the one-time load if this
    /// is the first call. Holding the lock across the load is what
    /// guarantees at-most-once: late arrivals block here and observe the
    /// winner's outcome.
    fn recognizer(&self) -> Option<Arc<dyn EntityRecognizer>> {
        let mut cell = self.cell.lock();
        match &*cell {
            LoadCell::Active(recognizer) => Some(Arc::clone(recognizer)),
            LoadCell::Disabled => None,
            LoadCell::Uninitialized => match self.provider.load() {
                Ok(recognizer) => {
                    tracing::debug!(
                        kinds = self.kinds.len(),
                        "entity recognizer loaded"
                    );
                    *cell = LoadCell::Active(Arc::clone(&recognizer));
                    Some(recognizer)
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "entity recognizer unavailable, continuing with pattern-only redaction"
                    );
                    *cell = LoadCell::Disabled;
                    None
                }
            },
        }
    }

    fn disable(&self, reason: &str, error: &RecognizerError) {
        tracing::warn!(
            error = %error,
            "entity layer disabled: {reason}"
        );
        *self.cell.lock() = LoadCell::Disabled;
    }
}

impl TextTransform for EntityRedactor {
    fn apply(&self, text: &str) -> String {
        Self::apply(self, text)
    }
}

impl std::fmt::Debug for EntityRedactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRedactor")
            .field("status", &self.status())
            .field("kinds", &self.kinds)
            .field("min_score", &self.min_score)
            .finish_non_exhaustive()
    }
}
