//! JSON description of an error tree.
//!
//! Lets fixtures and bug reports describe the errors an engine produced
//! without writing Rust:
//!
//! ```json
//! {"kind": "located", "message": "agg", "locations": [{"line": 2, "column": 5}],
//!  "path": ["user"], "cause": {"kind": "multi", "errors": [
//!     {"kind": "plain", "message": "a"}]}}
//! ```

use serde::Deserialize;

use gqlerrors_core::{
    ExecutionError, Extensions, LocatedError, MultiError, ResolverError, ResponsePath,
    SourceLocation,
};

/// One node of an error tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorTree {
    /// A resolver error, optionally carrying extensions and an overriding path.
    Plain {
        message: String,
        #[serde(default)]
        extensions: Extensions,
        #[serde(default)]
        path: Option<ResponsePath>,
    },
    /// A located execution error.
    Located {
        message: String,
        #[serde(default)]
        locations: Vec<SourceLocation>,
        #[serde(default)]
        path: Option<ResponsePath>,
        #[serde(default)]
        cause: Option<Box<ErrorTree>>,
    },
    /// An aggregate of independent errors.
    Multi {
        #[serde(default)]
        errors: Vec<ErrorTree>,
    },
}

impl ErrorTree {
    /// Convert into the error value the formatter consumes.
    pub fn build(&self) -> ExecutionError {
        match self {
            ErrorTree::Plain {
                message,
                extensions,
                path,
            } => {
                let mut err = ResolverError::new(message.clone()).with_extensions(extensions.clone());
                if let Some(path) = path {
                    err = err.with_path(path.iter().cloned());
                }
                ExecutionError::from(err)
            }
            ErrorTree::Located {
                message,
                locations,
                path,
                cause,
            } => {
                let mut err = LocatedError::new(message.clone()).with_locations(locations.clone());
                err.path = path.clone();
                if let Some(cause) = cause {
                    err = err.with_cause(cause.build());
                }
                ExecutionError::from(err)
            }
            ErrorTree::Multi { errors } => {
                ExecutionError::from(errors.iter().map(ErrorTree::build).collect::<MultiError>())
            }
        }
    }

    /// Number of nested levels below this node, counting every node kind.
    pub fn depth(&self) -> usize {
        match self {
            ErrorTree::Plain { .. } => 0,
            ErrorTree::Located { cause, .. } => cause.as_ref().map_or(0, |c| c.depth() + 1),
            ErrorTree::Multi { errors } => errors.iter().map(|e| e.depth() + 1).max().unwrap_or(0),
        }
    }
}
