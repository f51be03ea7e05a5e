//! Static per-task operational knowledge
//!
//! The pipeline consumes knowledge through the [`KnowledgeBase`] trait so
//! richer providers (indexed runbooks, plan generators) can be swapped in
//! later without touching the classification logic. The shipped
//! implementation is a fixed keyed table.

use crate::types::{KnowledgeReference, TaskType};

/// Read-only, keyed lookup of per-task guidance
///
/// Implementations must be synchronous and non-blocking; the pipeline
/// treats the lookup as a pure function of the task type.
pub trait KnowledgeBase: Send + Sync {
    /// Guidance for a task, or `None` when no task was recognized
    fn lookup(&self, task_id: TaskType) -> Option<KnowledgeReference>;
}

/// Built-in static knowledge table for the order-management domain
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    /// Create the static table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeBase for StaticKnowledgeBase {
    fn lookup(&self, task_id: TaskType) -> Option<KnowledgeReference> {
        match task_id {
            TaskType::CancelOrder => Some(KnowledgeReference {
                description: "Order cancellation request identified".to_string(),
                runbook_path: "knowledge/runbooks/cancel-order-runbook.md".to_string(),
                api_spec_path: "knowledge/api-specs/order-management-api.md".to_string(),
                typical_steps: vec![
                    "Validate order exists and is cancellable".to_string(),
                    "Check user permissions".to_string(),
                    "Execute cancellation via API".to_string(),
                    "Verify cancellation completed".to_string(),
                ],
            }),
            TaskType::ChangeOrderStatus => Some(KnowledgeReference {
                description: "Order status change request identified".to_string(),
                runbook_path: "knowledge/runbooks/change-order-status-runbook.md".to_string(),
                api_spec_path: "knowledge/api-specs/order-management-api.md".to_string(),
                typical_steps: vec![
                    "Validate order exists".to_string(),
                    "Check status transition is valid".to_string(),
                    "Update order status via API".to_string(),
                    "Verify status change completed".to_string(),
                ],
            }),
            TaskType::None => None,
        }
    }
}
