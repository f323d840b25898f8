//! The composed redaction pipeline.

use crate::errors::RedactionError;
use crate::payload::{walk, Payload};
use crate::redact::detector::{DetectorState, EntityRedactor};
use crate::redact::entity::{EntityKind, RecognizerProvider};
use crate::redact::pattern::PatternRedactor;
use crate::redact::rules::{default_rules, RedactionRule};
use crate::redact::transform::{PayloadTransform, TextTransform};
use std::collections::HashSet;

/// The two-layer redaction pipeline.
///
/// The pattern layer always runs first: it is cheap and deterministic, and
/// stripping structured PII before the entity layer sees the text shrinks
/// both the NLP cost and its false-negative surface. The entity layer runs
/// second and only acts on whatever pattern matching could not express.
///
/// A pipeline built without a recognizer provider is pattern-only; a
/// pipeline whose detector has disabled itself degrades to pattern-only at
/// runtime. Call sites never see the difference.
#[derive(Debug)]
pub struct RedactionPipeline {
    patterns: PatternRedactor,
    entities: Option<EntityRedactor>,
}

impl RedactionPipeline {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> RedactionPipelineBuilder {
        RedactionPipelineBuilder::new()
    }

    /// Builds the default pattern-only pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`RedactionError`] if the built-in rules fail to compile
    /// (they do not; the error surface exists for custom configurations).
    pub fn pattern_only() -> Result<Self, RedactionError> {
        Self::builder().build()
    }

    /// Redacts a whole payload tree, preserving its shape.
    #[must_use]
    pub fn redact(&self, payload: Payload) -> Payload {
        walk(payload, self)
    }

    /// Returns the detector's lifecycle state, or `None` for a
    /// pattern-only pipeline.
    #[must_use]
    pub fn detector_status(&self) -> Option<DetectorState> {
        self.entities.as_ref().map(EntityRedactor::status)
    }

    /// Human-readable descriptions of the active layers, for operator
    /// surfaces.
    #[must_use]
    pub fn layer_descriptions(&self) -> Vec<String> {
        let rules = self
            .patterns
            .rule_names()
            .collect::<Vec<_>>()
            .join(", ");
        let mut layers = vec![format!("patterns ({rules})")];
        match self.detector_status() {
            Some(DetectorState::Disabled) => layers.push("entities (disabled)".to_string()),
            Some(_) => layers.push("entities".to_string()),
            None => {}
        }
        layers
    }
}

impl TextTransform for RedactionPipeline {
    fn apply(&self, text: &str) -> String {
        let after_patterns = self.patterns.apply(text);
        match &self.entities {
            Some(entities) => entities.apply(&after_patterns),
            None => after_patterns,
        }
    }
}

impl PayloadTransform for RedactionPipeline {
    fn transform(&self, payload: Payload) -> Payload {
        self.redact(payload)
    }
}

/// Builder for [`RedactionPipeline`].
///
/// Configuration errors (malformed patterns, unknown entity kind names)
/// surface from [`RedactionPipelineBuilder::build`]; a misconfigured
/// pipeline is never constructed.
#[derive(Default)]
pub struct RedactionPipelineBuilder {
    rules: Option<Vec<RedactionRule>>,
    provider: Option<Box<dyn RecognizerProvider>>,
    kinds: Option<HashSet<EntityKind>>,
    kind_names: Vec<String>,
    min_score: f32,
}

impl RedactionPipelineBuilder {
    /// Creates a builder with the default rule policy and no entity layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the built-in rule policy.
    #[must_use]
    pub fn rules(mut self, rules: Vec<RedactionRule>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Appends a rule to the policy (starting from the built-in policy if
    /// none was set).
    #[must_use]
    pub fn rule(mut self, rule: RedactionRule) -> Self {
        self.rules.get_or_insert_with(default_rules).push(rule);
        self
    }

    /// Enables the entity layer with `provider`.
    #[must_use]
    pub fn recognizer(mut self, provider: Box<dyn RecognizerProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Restricts the entity layer to `kinds`.
    #[must_use]
    pub fn entity_kinds(mut self, kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Restricts the entity layer to the named kinds, validated at build.
    #[must_use]
    pub fn entity_kind_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.kind_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the minimum confidence for an entity span to be acted on.
    #[must_use]
    pub fn min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`RedactionError`] for a malformed rule pattern, an empty
    /// rule label, or an unknown entity kind name.
    pub fn build(self) -> Result<RedactionPipeline, RedactionError> {
        let patterns = PatternRedactor::new(self.rules.unwrap_or_else(default_rules))?;

        let mut kinds = self.kinds.unwrap_or_else(EntityKind::default_detection_set);
        if !self.kind_names.is_empty() {
            kinds = self
                .kind_names
                .iter()
                .map(|name| EntityKind::from_config(name))
                .collect::<Result<HashSet<_>, _>>()?;
        }

        let entities = self
            .provider
            .map(|provider| EntityRedactor::new(provider, kinds, self.min_score));

        Ok(RedactionPipeline { patterns, entities })
    }
}

impl std::fmt::Debug for RedactionPipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedactionPipelineBuilder")
            .field("rules", &self.rules)
            .field("has_provider", &self.provider.is_some())
            .field("kinds", &self.kinds)
            .field("kind_names", &self.kind_names)
            .field("min_score", &self.min_score)
            .finish()
    }
}
