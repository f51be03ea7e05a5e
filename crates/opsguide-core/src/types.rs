//! Core types for OpsGuide
//!
//! Defines the fundamental types for the classification pipeline:
//! - Incoming operational requests
//! - Task and status enumerations
//! - Classification and extraction results
//! - The assembled per-request result

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Confidence assigned when a task rule matched.
pub const MATCH_CONFIDENCE: f64 = 0.9;

/// Confidence assigned when no rule matched.
///
/// This is a deliberate two-level trust signal, not a probability: the
/// classifier never produces intermediate values.
pub const NO_MATCH_CONFIDENCE: f64 = 0.5;

/// Unique request identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate new request ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target environment for an operational request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development
    #[default]
    Dev,
    /// Staging
    Staging,
    /// Production
    Prod,
}

impl Environment {
    /// Wire value for this environment
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Known operational tasks
///
/// Closed set: anything outside this vocabulary classifies as [`TaskType::None`],
/// which is an expected outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Cancel an order
    #[serde(rename = "CANCEL_ORDER")]
    CancelOrder,
    /// Change an order's status
    #[serde(rename = "CHANGE_ORDER_STATUS")]
    ChangeOrderStatus,
    /// No recognized task
    #[serde(rename = "NONE")]
    None,
}

impl TaskType {
    /// Whether this is a recognized task (not [`TaskType::None`])
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TaskType::None)
    }

    /// Wire value, or `None` for the unrecognized case
    ///
    /// The HTTP contract serializes an unrecognized task as JSON `null`.
    #[inline]
    #[must_use]
    pub fn wire_value(&self) -> Option<&'static str> {
        match self {
            TaskType::CancelOrder => Some("CANCEL_ORDER"),
            TaskType::ChangeOrderStatus => Some("CHANGE_ORDER_STATUS"),
            TaskType::None => None,
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value().unwrap_or("NONE"))
    }
}

/// Canonical target statuses recognized in status-change requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    /// Waiting to be processed
    Pending,
    /// Actively being processed
    InProgress,
    /// Paused
    OnHold,
    /// Finished
    Completed,
    /// Cancelled
    Cancelled,
    /// Awaiting review
    UnderReview,
}

impl StatusType {
    /// Wire value for this status
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Pending => "pending",
            StatusType::InProgress => "in_progress",
            StatusType::OnHold => "on_hold",
            StatusType::Completed => "completed",
            StatusType::Cancelled => "cancelled",
            StatusType::UnderReview => "under_review",
        }
    }
}

impl std::fmt::Display for StatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Urgent / critical
    High,
    /// Normal / standard
    Medium,
    /// Minor / routine
    Low,
}

impl Priority {
    /// Wire value for this priority
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming operational request
///
/// Constructed once per call after the surrounding layer has validated the
/// payload; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalRequest {
    /// Natural language request (non-empty, already trimmed)
    pub query: String,
    /// Declared target environment
    pub environment: Environment,
    /// Opaque identifier of the requesting user
    pub user_id: String,
}

impl OperationalRequest {
    /// Create new request
    #[inline]
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        environment: Environment,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            environment,
            user_id: user_id.into(),
        }
    }
}

/// Request classification result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Identified task, or [`TaskType::None`]
    pub task_id: TaskType,
    /// Binary trust signal: exactly 0.9 when matched, exactly 0.5 otherwise
    pub confidence: f64,
}

impl ClassificationResult {
    /// Result for a matched task
    #[inline]
    #[must_use]
    pub fn matched(task_id: TaskType) -> Self {
        Self {
            task_id,
            confidence: MATCH_CONFIDENCE,
        }
    }

    /// Result for an unmatched query
    #[inline]
    #[must_use]
    pub fn unmatched() -> Self {
        Self {
            task_id: TaskType::None,
            confidence: NO_MATCH_CONFIDENCE,
        }
    }
}

/// Entities extracted from the query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Domain identifier found in the text (e.g. an order id)
    pub identifier: Option<String>,
    /// Service label, assigned statically per task family
    pub service: String,
    /// Target status; only populated for status-change tasks
    pub target_status: Option<StatusType>,
    /// Priority level mentioned in the text
    pub priority: Option<Priority>,
}

/// Static per-task operational guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeReference {
    /// Human-readable summary of the identified task
    pub description: String,
    /// Path to the runbook document
    pub runbook_path: String,
    /// Path to the relevant API specification
    pub api_spec_path: String,
    /// Ordered outline of the usual resolution steps
    pub typical_steps: Vec<String>,
}

/// Assembled result for one operational request
///
/// Read-only aggregate of every pipeline stage; created fresh per request
/// and discarded once the response is returned.
#[derive(Debug, Clone, Serialize)]
pub struct OperationalResult {
    /// Generated request identifier
    pub request_id: RequestId,
    /// Creation timestamp
    pub timestamp: DateTime<Utc>,
    /// The request as received
    pub request: OperationalRequest,
    /// Classifier verdict
    pub classification: ClassificationResult,
    /// Environment the request resolves to (query mention wins over the
    /// declared value)
    pub environment: Environment,
    /// Extracted entities
    pub entities: ExtractedEntities,
    /// Per-task guidance; absent when no task was recognized
    pub knowledge: Option<KnowledgeReference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn environment_round_trip() {
        for env in [Environment::Dev, Environment::Staging, Environment::Prod] {
            assert_eq!(env.as_str().parse::<Environment>(), Ok(env));
        }
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn task_type_wire_values() {
        assert_eq!(TaskType::CancelOrder.wire_value(), Some("CANCEL_ORDER"));
        assert_eq!(
            TaskType::ChangeOrderStatus.wire_value(),
            Some("CHANGE_ORDER_STATUS")
        );
        assert_eq!(TaskType::None.wire_value(), None);
        assert!(!TaskType::None.is_recognized());
        assert!(TaskType::CancelOrder.is_recognized());
    }

    #[test]
    fn status_type_serializes_snake_case() {
        let json = serde_json::to_string(&StatusType::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        let json = serde_json::to_string(&StatusType::OnHold).unwrap();
        assert_eq!(json, "\"on_hold\"");
    }

    #[test]
    fn classification_result_constructors() {
        let matched = ClassificationResult::matched(TaskType::CancelOrder);
        assert_eq!(matched.confidence, MATCH_CONFIDENCE);
        assert_eq!(matched.task_id, TaskType::CancelOrder);

        let unmatched = ClassificationResult::unmatched();
        assert_eq!(unmatched.confidence, NO_MATCH_CONFIDENCE);
        assert_eq!(unmatched.task_id, TaskType::None);
    }
}
