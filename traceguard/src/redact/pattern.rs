//! The deterministic pattern layer.

use crate::errors::RedactionError;
use crate::redact::rules::RedactionRule;
use crate::redact::transform::TextTransform;
use regex::Regex;

/// A rule compiled and ready to apply.
#[derive(Debug)]
struct CompiledRule {
    name: String,
    regex: Regex,
    label: String,
}

/// Deterministic structured-PII redaction.
///
/// Rules are compiled eagerly at construction; a malformed pattern fails
/// the build rather than being skipped at apply time. After construction
/// the redactor is immutable and safe to share across concurrent requests.
#[derive(Debug)]
pub struct PatternRedactor {
    rules: Vec<CompiledRule>,
}

impl PatternRedactor {
    /// Compiles `rules` into a redactor.
    ///
    /// # Errors
    ///
    /// Returns [`RedactionError::InvalidPattern`] for an uncompilable
    /// pattern and [`RedactionError::EmptyLabel`] for a rule with no
    /// replacement label.
    pub fn new(rules: Vec<RedactionRule>) -> Result<Self, RedactionError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.label.is_empty() {
                return Err(RedactionError::EmptyLabel(rule.name));
            }
            let regex = Regex::new(&rule.pattern).map_err(|source| {
                RedactionError::InvalidPattern {
                    name: rule.name.clone(),
                    source,
                }
            })?;
            compiled.push(CompiledRule {
                name: rule.name,
                regex,
                label: rule.label,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Applies every rule in declaration order, replacing all occurrences.
    ///
    /// Deterministic and total: the same input always yields the same
    /// output and no input can fail.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            if rule.regex.is_match(&current) {
                current = rule
                    .regex
                    .replace_all(&current, rule.label.as_str())
                    .into_owned();
            }
        }
        current
    }

    /// Returns the names of the active rules, in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TextTransform for PatternRedactor {
    fn apply(&self, text: &str) -> String {
        Self::apply(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redact::rules::default_rules;
    use pretty_assertions::assert_eq;

    fn default_redactor() -> PatternRedactor {
        PatternRedactor::new(default_rules()).expect("default rules compile")
    }

    #[test]
    fn redacts_each_default_category() {
        let redactor = default_redactor();
        assert_eq!(
            redactor.apply("mail luke.skywalker@rebelalliance.org now"),
            "mail <EMAIL> now"
        );
        assert_eq!(redactor.apply("SSN 000-42-1234."), "SSN <SSN>.");
        assert_eq!(redactor.apply("call 555-290-7753"), "call <PHONE>");
        assert_eq!(redactor.apply("call 555.290.7753"), "call <PHONE>");
        assert_eq!(redactor.apply("call 5552907753"), "call <PHONE>");
        assert_eq!(
            redactor.apply("card 4242-4242-4242-4242 on file"),
            "card <CREDIT_CARD> on file"
        );
        assert_eq!(redactor.apply("account ACT-77421"), "account <ACCOUNT_ID>");
    }

    #[test]
    fn replaces_every_occurrence() {
        let redactor = default_redactor();
        assert_eq!(
            redactor.apply("a@b.com wrote to c@d.org"),
            "<EMAIL> wrote to <EMAIL>"
        );
    }

    #[test]
    fn idempotent_on_already_redacted_text() {
        let redactor = default_redactor();
        let once = redactor.apply(
            "Hi, I am Leia Organa, email leia.organa@rebelalliance.org, SSN 000-66-5678.",
        );
        assert_eq!(redactor.apply(&once), once);

        let labels_only = "Reached <PERSON> at <EMAIL>, card <CREDIT_CARD>.";
        assert_eq!(redactor.apply(labels_only), labels_only);
    }

    #[test]
    fn declaration_order_decides_overlapping_matches() {
        // Both rules can match a 3-3-4 digit run; the one declared first
        // rewrites the text before the second ever sees it.
        let phone_first = PatternRedactor::new(vec![
            RedactionRule::new("phone", r"\b\d{3}-\d{3}-\d{4}\b", "<PHONE>"),
            RedactionRule::new("digits", r"\b[\d-]{12}\b", "<DIGITS>"),
        ])
        .expect("rules compile");
        assert_eq!(phone_first.apply("555-123-4567"), "<PHONE>");

        let digits_first = PatternRedactor::new(vec![
            RedactionRule::new("digits", r"\b[\d-]{12}\b", "<DIGITS>"),
            RedactionRule::new("phone", r"\b\d{3}-\d{3}-\d{4}\b", "<PHONE>"),
        ])
        .expect("rules compile");
        assert_eq!(digits_first.apply("555-123-4567"), "<DIGITS>");
    }

    #[test]
    fn card_numbers_survive_the_phone_rule() {
        let redactor = default_redactor();
        assert_eq!(
            redactor.apply("pay with 4242424242424242"),
            "pay with <CREDIT_CARD>"
        );
    }

    #[test]
    fn malformed_pattern_fails_construction() {
        let err = PatternRedactor::new(vec![RedactionRule::new("broken", r"(unclosed", "<X>")])
            .expect_err("must not build");
        assert!(matches!(
            err,
            RedactionError::InvalidPattern { ref name, .. } if name == "broken"
        ));
    }

    #[test]
    fn empty_label_fails_construction() {
        let err = PatternRedactor::new(vec![RedactionRule::new("email", r"@", "")])
            .expect_err("must not build");
        assert!(matches!(err, RedactionError::EmptyLabel(ref name) if name == "email"));
    }

    #[test]
    fn plain_text_is_untouched() {
        let redactor = default_redactor();
        let text = "How do I reset my password?";
        assert_eq!(redactor.apply(text), text);
    }
}
