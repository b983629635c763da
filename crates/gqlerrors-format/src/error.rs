//! Errors produced while flattening error trees.

use thiserror::Error;

/// Flattening failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// Aggregate errors were nested deeper than the configured limit.
    #[error("error nesting depth limit ({limit}) exceeded")]
    DepthLimitExceeded { limit: usize },
}
