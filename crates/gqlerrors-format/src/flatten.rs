//! Expansion of aggregate errors into flat record lists.
//!
//! The flattener walks the error tree with an explicit work stack, so deep
//! nesting never grows the call stack. Output order is depth-first,
//! left-to-right: children are pushed in reverse so the first child is
//! popped first.
//!
//! Two kinds of aggregate are expanded:
//! - a located error whose cause is an aggregate: every child is re-wrapped
//!   in a located error that inherits the parent's locations and path,
//! - a bare aggregate: every child is expanded as-is, with no context to
//!   inherit.
//!
//! Everything else is a leaf and goes through [`normalize`](crate::normalize).

use gqlerrors_core::{ExecutionError, FormattedError, LocatedError};

use crate::error::FlattenError;
use crate::normalize::normalize_ref;

/// Configuration for the flattener.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Maximum number of nested aggregate expansions. Default: 256.
    pub max_depth: usize,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig { max_depth: 256 }
    }
}

/// Flattens error trees under a fixed [`FlattenConfig`].
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener { config }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Expand `err` into one record per leaf error.
    ///
    /// An aggregate with no children contributes nothing. Fails only when
    /// aggregates nest deeper than `max_depth`.
    pub fn flatten(&self, err: &ExecutionError) -> Result<Vec<FormattedError>, FlattenError> {
        let mut records = Vec::new();
        let mut work: Vec<(ExecutionError, usize)> = vec![(err.clone(), 0)];

        while let Some((current, depth)) = work.pop() {
            if !is_aggregate(&current) {
                records.push(normalize_ref(&current));
                continue;
            }

            if depth >= self.config.max_depth {
                tracing::warn!(
                    "error nesting exceeds depth limit {}",
                    self.config.max_depth
                );
                return Err(FlattenError::DepthLimitExceeded {
                    limit: self.config.max_depth,
                });
            }

            let children = expand(&current);
            tracing::trace!("expanding {} child error(s) at depth {}", children.len(), depth);
            work.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        Ok(records)
    }
}

/// Flatten with the default configuration.
pub fn flatten(err: impl Into<ExecutionError>) -> Result<Vec<FormattedError>, FlattenError> {
    Flattener::default().flatten(&err.into())
}

/// The aggregate whose children replace `err`: a located error's cause, or
/// `err` itself.
fn aggregate_children(err: &ExecutionError) -> Option<&[ExecutionError]> {
    if let ExecutionError::Located(parent) = err {
        if let Some(children) = parent.cause.as_ref().and_then(ExecutionError::errors) {
            return Some(children);
        }
    }
    err.errors()
}

fn is_aggregate(err: &ExecutionError) -> bool {
    aggregate_children(err).is_some()
}

/// Children to visit in place of an aggregate `err`.
///
/// Children of a located parent are re-wrapped with the parent's context. A
/// wrapper around another aggregate is always expanded again and never
/// rendered, so its message is left empty.
fn expand(err: &ExecutionError) -> Vec<ExecutionError> {
    let children = aggregate_children(err).unwrap_or_default();

    let parent = match err {
        ExecutionError::Located(parent) => parent,
        _ => return children.to_vec(),
    };

    children
        .iter()
        .map(|child| {
            let message = if child.errors().is_some() {
                String::new()
            } else {
                child.to_string()
            };
            ExecutionError::from(LocatedError {
                message,
                locations: parent.locations.clone(),
                path: parent.path.clone(),
                cause: Some(child.clone()),
            })
        })
        .collect()
}
