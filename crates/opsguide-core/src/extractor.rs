//! Entity extraction from natural language queries
//!
//! Pulls structured values out of free text: a domain identifier, a target
//! status (status-change tasks only), a priority, and an environment
//! mention. Like the classifier, extraction is total — an absent entity is
//! an empty field, never an error.

use crate::error::ConfigError;
use crate::types::{Environment, ExtractedEntities, Priority, StatusType, TaskType};
use regex::Regex;

/// Static service label for the order-management task family
///
/// Assigned per task family, never inferred from the query text.
pub const ORDER_SERVICE: &str = "Order";

/// Immutable extraction tables, compiled once at construction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    identifier_patterns: Vec<Regex>,
    status_synonyms: Vec<(StatusType, Regex)>,
    priority_synonyms: Vec<(Priority, Regex)>,
    environment_synonyms: Vec<(Environment, Regex)>,
}

impl ExtractorConfig {
    /// Built-in tables for the order-management domain
    pub fn builtin() -> Result<Self, ConfigError> {
        // Identifier patterns, tried in order; the first capture wins.
        //
        // The multi-segment form captures only the first digit run
        // (ORDER-2024-001 yields "2024", not the full identifier). That is
        // long-standing behavior callers depend on; whether the full
        // identifier should be returned instead is an unresolved product
        // decision, so the capture is kept as-is.
        let identifier_patterns = compile_all(&[
            r"(?i)ORDER[_-](\d{4})[_-][\w-]+",
            r"(?i)\border[_\s-]?(\d+)\b",
            r"(?i)\border[_\s-]?id[_\s-]?(\w+)\b",
            r"(?i)\b([a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12})\b",
            r"\b(\d{4,})\b",
        ])?;

        let status_synonyms = vec![
            (
                StatusType::Completed,
                Regex::new(r"\bcomplete\b|\bfinish\b|\bdone\b|\bcompleted\b")?,
            ),
            (
                StatusType::Cancelled,
                Regex::new(r"\bcancel\b|\babort\b|\bterminate\b|\bcancelled\b")?,
            ),
            (
                StatusType::OnHold,
                Regex::new(r"\bhold\b|\bpause\b|\bsuspend\b|\bon[_\s-]?hold\b")?,
            ),
            (
                StatusType::InProgress,
                Regex::new(r"\bin[_\s-]?progress\b|\bactive\b|\bstart\b|\bstarted\b")?,
            ),
            (
                StatusType::UnderReview,
                Regex::new(r"\breview\b|\bcheck\b|\bvalidate\b|\bunder[_\s-]?review\b")?,
            ),
            (
                StatusType::Pending,
                Regex::new(r"\bpending\b|\bwaiting\b|\bqueue\b")?,
            ),
        ];

        let priority_synonyms = vec![
            (
                Priority::High,
                Regex::new(r"\bhigh\b|\burgent\b|\bcritical\b|\bemergency\b")?,
            ),
            (
                Priority::Medium,
                Regex::new(r"\bmedium\b|\bnormal\b|\bstandard\b")?,
            ),
            (
                Priority::Low,
                Regex::new(r"\blow\b|\bminor\b|\broutine\b")?,
            ),
        ];

        let environment_synonyms = vec![
            (
                Environment::Dev,
                Regex::new(r"\bdev\b|\bdevelopment\b|\bdev-\w+\b")?,
            ),
            (
                Environment::Staging,
                Regex::new(r"\bstaging\b|\bstage\b|\bstg\b")?,
            ),
            (
                Environment::Prod,
                Regex::new(r"\bprod\b|\bproduction\b|\bprd\b")?,
            ),
        ];

        Ok(Self {
            identifier_patterns,
            status_synonyms,
            priority_synonyms,
            environment_synonyms,
        })
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(ConfigError::from))
        .collect()
}

/// Extracts structured entities from natural language text
///
/// Stateless after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    config: ExtractorConfig,
}

impl EntityExtractor {
    /// Create an extractor from pre-built tables
    #[inline]
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with the built-in tables
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Ok(Self::new(ExtractorConfig::builtin()?))
    }

    /// Extract all entities relevant to the classified task
    ///
    /// `target_status` is only attempted for status-change tasks; for every
    /// other task type it is always empty.
    #[must_use]
    pub fn extract(&self, query: &str, task_id: TaskType) -> ExtractedEntities {
        let query_lower = query.to_lowercase();

        // The bare digit-run pattern would fire on any number in unrelated
        // text, so identifiers are only scanned when the query mentions the
        // order domain at all.
        let identifier = if query_lower.contains("order") {
            self.extract_identifier(query)
        } else {
            None
        };

        let target_status = if task_id == TaskType::ChangeOrderStatus {
            self.extract_target_status(query)
        } else {
            None
        };

        ExtractedEntities {
            identifier,
            service: ORDER_SERVICE.to_string(),
            target_status,
            priority: self.extract_priority(query),
        }
    }

    /// Extract a domain identifier from the query
    ///
    /// Patterns are tried in order; the first capture group of the first
    /// matching pattern is returned.
    #[must_use]
    pub fn extract_identifier(&self, query: &str) -> Option<String> {
        for pattern in &self.config.identifier_patterns {
            if let Some(caps) = pattern.captures(query) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
        None
    }

    /// Extract a target status for status-change operations
    ///
    /// Returns the first canonical status whose synonym group matches.
    #[must_use]
    pub fn extract_target_status(&self, query: &str) -> Option<StatusType> {
        let query_lower = query.to_lowercase();
        self.config
            .status_synonyms
            .iter()
            .find(|(_, pattern)| pattern.is_match(&query_lower))
            .map(|(status, _)| *status)
    }

    /// Extract a priority level mentioned in the query
    #[must_use]
    pub fn extract_priority(&self, query: &str) -> Option<Priority> {
        let query_lower = query.to_lowercase();
        self.config
            .priority_synonyms
            .iter()
            .find(|(_, pattern)| pattern.is_match(&query_lower))
            .map(|(priority, _)| *priority)
    }

    /// Detect an environment mentioned in the query
    ///
    /// Callers fall back to the request's declared environment when the
    /// query names none.
    #[must_use]
    pub fn detect_environment(&self, query: &str) -> Option<Environment> {
        let query_lower = query.to_lowercase();
        self.config
            .environment_synonyms
            .iter()
            .find(|(_, pattern)| pattern.is_match(&query_lower))
            .map(|(env, _)| *env)
    }
}
