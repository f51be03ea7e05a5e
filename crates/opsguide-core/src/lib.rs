//! OpsGuide Core - Operational request classification
//!
//! The engine that:
//! - Classifies free-text operational requests into a closed set of tasks
//! - Assigns a binary confidence signal (0.9 matched / 0.5 unmatched)
//! - Extracts structured entities (identifier, target status, priority)
//! - Assembles the per-request result with static per-task guidance
//!
//! # Example
//!
//! ```rust
//! use opsguide_core::{Environment, OperationalRequest, RequestPipeline, TaskType};
//!
//! # fn example() -> Result<(), opsguide_core::ConfigError> {
//! let pipeline = RequestPipeline::new()?;
//!
//! let request = OperationalRequest::new(
//!     "cancel order ORDER-2024-001",
//!     Environment::Dev,
//!     "user-42",
//! );
//! let result = pipeline.process(&request);
//!
//! assert_eq!(result.classification.task_id, TaskType::CancelOrder);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod knowledge;
pub mod pipeline;
pub mod types;

// Re-exports for convenience
pub use classifier::{ClassifierConfig, CooccurrenceRule, PatternClassifier, TaskDefinition};
pub use error::ConfigError;
pub use extractor::{EntityExtractor, ExtractorConfig, ORDER_SERVICE};
pub use knowledge::{KnowledgeBase, StaticKnowledgeBase};
pub use pipeline::RequestPipeline;
pub use types::{
    ClassificationResult, Environment, ExtractedEntities, KnowledgeReference,
    OperationalRequest, OperationalResult, Priority, RequestId, StatusType, TaskType,
    MATCH_CONFIDENCE, NO_MATCH_CONFIDENCE,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with OpsGuide Core
    pub use crate::{
        ClassificationResult, Environment, EntityExtractor, ExtractedEntities, KnowledgeBase,
        OperationalRequest, OperationalResult, PatternClassifier, RequestPipeline,
        StaticKnowledgeBase, StatusType, TaskType,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
