//! Request pipeline
//!
//! The thin orchestrator over the two pure stages:
//! classify → extract → assemble. Each stage is a total function over its
//! inputs; there are no retries, transitions, or partial-failure states.

use crate::classifier::{ClassifierConfig, PatternClassifier};
use crate::error::ConfigError;
use crate::extractor::EntityExtractor;
use crate::knowledge::{KnowledgeBase, StaticKnowledgeBase};
use crate::types::{OperationalRequest, OperationalResult, RequestId};
use std::sync::Arc;

/// The classification-and-extraction pipeline
///
/// Holds immutable configuration only; any number of calls may run in
/// parallel across threads without locking.
pub struct RequestPipeline {
    classifier: PatternClassifier,
    extractor: EntityExtractor,
    knowledge: Arc<dyn KnowledgeBase>,
}

impl RequestPipeline {
    /// Create a pipeline with the built-in tables and static knowledge
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: PatternClassifier::with_defaults()?,
            extractor: EntityExtractor::with_defaults()?,
            knowledge: Arc::new(StaticKnowledgeBase::new()),
        })
    }

    /// Create a pipeline with a custom classifier configuration
    pub fn with_classifier_config(config: ClassifierConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: PatternClassifier::new(config)?,
            extractor: EntityExtractor::with_defaults()?,
            knowledge: Arc::new(StaticKnowledgeBase::new()),
        })
    }

    /// Replace the knowledge provider
    #[must_use]
    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Process one operational request
    ///
    /// # Workflow
    /// 1. Classify the query into a task type + confidence
    /// 2. Extract entities, informed by the classification
    /// 3. Resolve the environment (query mention overrides the declared one)
    /// 4. Look up static guidance for the task
    /// 5. Assemble the result with a fresh id and timestamp
    #[must_use]
    pub fn process(&self, request: &OperationalRequest) -> OperationalResult {
        tracing::info!(user_id = %request.user_id, "processing operational request");

        let classification = self.classifier.classify(&request.query);
        tracing::debug!(
            task = %classification.task_id,
            confidence = classification.confidence,
            "classified request"
        );

        let entities = self.extractor.extract(&request.query, classification.task_id);

        let environment = self
            .extractor
            .detect_environment(&request.query)
            .unwrap_or(request.environment);

        let knowledge = self.knowledge.lookup(classification.task_id);

        OperationalResult {
            request_id: RequestId::new(),
            timestamp: chrono::Utc::now(),
            request: request.clone(),
            classification,
            environment,
            entities,
            knowledge,
        }
    }
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("classifier", &self.classifier)
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}
