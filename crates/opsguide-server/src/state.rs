//! Shared application state

use opsguide_core::{ConfigError, RequestPipeline};
use std::sync::Arc;

/// State shared by all request handlers
///
/// The pipeline is immutable after construction, so one instance is shared
/// across handlers with no locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The classification pipeline
    pub pipeline: Arc<RequestPipeline>,
}

impl AppState {
    /// Build state with the default pipeline
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            pipeline: Arc::new(RequestPipeline::new()?),
        })
    }
}
