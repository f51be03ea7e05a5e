//! Pattern-based request classification
//!
//! Maps free text to a known task type plus a binary confidence signal.
//! Recognition is keyword co-occurrence, not phrase matching: a rule is
//! satisfied when each of its keyword groups has at least one member
//! present as a whole token anywhere in the query. That lets phrasing
//! variants ("order ... cancel", "I need to cancel the order ...") match
//! while rejecting text that merely shares one keyword.
//!
//! Evaluation is strictly ordered: task definitions are tried in priority
//! order, rules within a definition in order, and the first satisfied rule
//! wins. There is no cross-task scoring.

use crate::error::ConfigError;
use crate::types::{ClassificationResult, TaskType};
use std::collections::HashSet;

/// A bounded keyword co-occurrence test
///
/// Holds one or more keyword groups. The rule is satisfied when every
/// group contributes at least one token to the query, in any order and at
/// any distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooccurrenceRule {
    groups: Vec<Vec<String>>,
}

impl CooccurrenceRule {
    /// Create a rule from keyword groups
    #[inline]
    #[must_use]
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self { groups }
    }

    /// Convenience constructor from string slices
    #[must_use]
    pub fn of(groups: &[&[&str]]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|k| (*k).to_string()).collect())
                .collect(),
        }
    }

    /// Keyword groups of this rule
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    fn is_satisfied(&self, tokens: &HashSet<String>) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|keyword| tokens.contains(keyword)))
    }
}

/// Ordered rule set for one task type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    /// Task this definition recognizes
    pub task: TaskType,
    /// Recognition rules, tried in order
    pub rules: Vec<CooccurrenceRule>,
}

impl TaskDefinition {
    /// Create new task definition
    #[inline]
    #[must_use]
    pub fn new(task: TaskType, rules: Vec<CooccurrenceRule>) -> Self {
        Self { task, rules }
    }
}

/// Immutable classifier configuration
///
/// Loaded once at construction and injected, so tests can substitute
/// fixture tables without touching global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Task definitions in priority order
    pub tasks: Vec<TaskDefinition>,
}

impl ClassifierConfig {
    /// Validate the configuration
    ///
    /// Rejects definitions for [`TaskType::None`], empty rule sets, and
    /// rules with empty keyword groups.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for def in &self.tasks {
            if def.task == TaskType::None {
                return Err(ConfigError::RuleForNone);
            }
            if def.rules.is_empty() {
                return Err(ConfigError::EmptyRuleSet { task: def.task });
            }
            for rule in &def.rules {
                if rule.groups.is_empty() || rule.groups.iter().any(Vec::is_empty) {
                    return Err(ConfigError::EmptyKeywordGroup { task: def.task });
                }
            }
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    /// Built-in recognition vocabulary for the order-management domain
    fn default() -> Self {
        Self {
            tasks: vec![
                TaskDefinition::new(
                    TaskType::CancelOrder,
                    vec![CooccurrenceRule::of(&[
                        &["cancel", "terminate", "abort", "stop"],
                        &["order"],
                    ])],
                ),
                TaskDefinition::new(
                    TaskType::ChangeOrderStatus,
                    vec![
                        CooccurrenceRule::of(&[&["change", "update", "set"], &["status"]]),
                        CooccurrenceRule::of(&[&["transition"], &["order"]]),
                        CooccurrenceRule::of(&[&["move"], &["order"], &["to"]]),
                        // Broader catch-all, tried last: an order plus a
                        // modification verb plus a state noun.
                        CooccurrenceRule::of(&[
                            &["order"],
                            &["change", "update", "fix", "modify"],
                            &["status", "state", "transition"],
                        ]),
                    ],
                ),
            ],
        }
    }
}

/// Classifies operational requests by keyword co-occurrence
///
/// Stateless after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    config: ClassifierConfig,
}

impl PatternClassifier {
    /// Create a classifier from a validated configuration
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a classifier with the built-in vocabulary
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(ClassifierConfig::default())
    }

    /// Classify a query
    ///
    /// Total function: unmatched input yields `task_id = NONE` at
    /// confidence 0.5, which is an expected outcome, not an error.
    #[must_use]
    pub fn classify(&self, query: &str) -> ClassificationResult {
        let tokens = tokenize(query);

        for def in &self.config.tasks {
            for rule in &def.rules {
                if rule.is_satisfied(&tokens) {
                    tracing::debug!(task = %def.task, "query matched task rule");
                    return ClassificationResult::matched(def.task);
                }
            }
        }

        tracing::debug!("query matched no task rule");
        ClassificationResult::unmatched()
    }
}

/// Split a query into lowercase word tokens
///
/// Any non-alphanumeric character is a boundary, so "ORDER-2024-001"
/// contributes the tokens `order`, `2024`, and `001`.
fn tokenize(query: &str) -> HashSet<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MATCH_CONFIDENCE, NO_MATCH_CONFIDENCE};

    fn classifier() -> PatternClassifier {
        PatternClassifier::with_defaults().unwrap()
    }

    #[test]
    fn cancel_order_matches() {
        let result = classifier().classify("cancel order ORDER-2024-001");
        assert_eq!(result.task_id, TaskType::CancelOrder);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn cancel_synonyms_match() {
        let c = classifier();
        for query in [
            "terminate order ORDER-789",
            "abort the order please",
            "stop order 12345",
            "the order should be cancelled... cancel it",
        ] {
            let result = c.classify(query);
            assert_eq!(result.task_id, TaskType::CancelOrder, "query: {query}");
        }
    }

    #[test]
    fn word_order_is_irrelevant() {
        let c = classifier();
        let a = c.classify("cancel order 123");
        let b = c.classify("order 123 needs a cancel");
        assert_eq!(a.task_id, b.task_id);
        assert_eq!(a.task_id, TaskType::CancelOrder);
    }

    #[test]
    fn change_status_matches() {
        let result = classifier().classify("change order status to completed for ORDER-456");
        assert_eq!(result.task_id, TaskType::ChangeOrderStatus);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn change_status_variants_match() {
        let c = classifier();
        for query in [
            "update status of order 9999",
            "set status to on hold for order 1234",
            "transition order 5678",
            "move order 4321 to completed",
            "modify the order state please",
        ] {
            let result = c.classify(query);
            assert_eq!(
                result.task_id,
                TaskType::ChangeOrderStatus,
                "query: {query}"
            );
        }
    }

    #[test]
    fn unrelated_text_yields_none() {
        let result = classifier().classify("do something random");
        assert_eq!(result.task_id, TaskType::None);
        assert_eq!(result.confidence, NO_MATCH_CONFIDENCE);
    }

    #[test]
    fn unrecognized_verbs_yield_none() {
        // "mark ... as" is not in the status-change vocabulary, by design.
        let result = classifier().classify("mark ORDER-999 as resolved");
        assert_eq!(result.task_id, TaskType::None);
        assert_eq!(result.confidence, NO_MATCH_CONFIDENCE);
    }

    #[test]
    fn single_shared_keyword_is_not_enough() {
        let c = classifier();
        // "order" alone, or a verb alone, must not trigger a match.
        assert_eq!(c.classify("where is my order").task_id, TaskType::None);
        assert_eq!(c.classify("cancel my subscription").task_id, TaskType::None);
        assert_eq!(c.classify("what is the status").task_id, TaskType::None);
    }

    #[test]
    fn cancel_takes_priority_over_status_change() {
        // Both vocabularies are present; the first task definition wins.
        let result = classifier().classify("cancel order and update status");
        assert_eq!(result.task_id, TaskType::CancelOrder);
    }

    #[test]
    fn empty_query_yields_none() {
        let result = classifier().classify("");
        assert_eq!(result.task_id, TaskType::None);
        assert_eq!(result.confidence, NO_MATCH_CONFIDENCE);
    }

    #[test]
    fn keywords_match_whole_tokens_only() {
        let c = classifier();
        // "cancelled" is not the token "cancel"; "orders" is not "order".
        assert_eq!(
            c.classify("the cancelled orders report").task_id,
            TaskType::None
        );
    }

    #[test]
    fn identifier_punctuation_splits_into_tokens() {
        // "ORDER-123" alone carries the "order" token.
        let result = classifier().classify("terminate ORDER-123");
        assert_eq!(result.task_id, TaskType::CancelOrder);
    }

    #[test]
    fn config_validation_rejects_empty_group() {
        let config = ClassifierConfig {
            tasks: vec![TaskDefinition::new(
                TaskType::CancelOrder,
                vec![CooccurrenceRule::new(vec![vec![]])],
            )],
        };
        assert!(matches!(
            PatternClassifier::new(config),
            Err(ConfigError::EmptyKeywordGroup { .. })
        ));
    }

    #[test]
    fn config_validation_rejects_none_definition() {
        let config = ClassifierConfig {
            tasks: vec![TaskDefinition::new(
                TaskType::None,
                vec![CooccurrenceRule::of(&[&["anything"]])],
            )],
        };
        assert!(matches!(
            PatternClassifier::new(config),
            Err(ConfigError::RuleForNone)
        ));
    }

    #[test]
    fn config_validation_rejects_empty_rule_set() {
        let config = ClassifierConfig {
            tasks: vec![TaskDefinition::new(TaskType::CancelOrder, vec![])],
        };
        assert!(matches!(
            PatternClassifier::new(config),
            Err(ConfigError::EmptyRuleSet { .. })
        ));
    }

    #[test]
    fn fixture_config_is_honored() {
        let config = ClassifierConfig {
            tasks: vec![TaskDefinition::new(
                TaskType::ChangeOrderStatus,
                vec![CooccurrenceRule::of(&[&["flip"], &["widget"]])],
            )],
        };
        let c = PatternClassifier::new(config).unwrap();
        assert_eq!(
            c.classify("flip the widget").task_id,
            TaskType::ChangeOrderStatus
        );
        assert_eq!(c.classify("cancel order 123").task_id, TaskType::None);
    }
}
