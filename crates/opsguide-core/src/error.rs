//! Error types for OpsGuide Core
//!
//! Classification and extraction are total functions: "no match" is an
//! expected result, never an error. The only failure surface in this crate
//! is configuration — building pattern tables at construction time.

use crate::types::TaskType;

/// Configuration errors raised while building pattern tables
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A rule contained an empty keyword group
    #[error("task {task} has a rule with an empty keyword group")]
    EmptyKeywordGroup {
        /// Task the offending rule belongs to
        task: TaskType,
    },

    /// A task definition carried no rules at all
    #[error("task {task} has no rules")]
    EmptyRuleSet {
        /// Task with the empty definition
        task: TaskType,
    },

    /// A definition was registered for the unrecognized-task marker
    #[error("cannot define rules for the NONE task")]
    RuleForNone,

    /// A synonym or identifier pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
