//! Optional error capabilities and the generic resolver error.
//!
//! [`Cause`] is the seam between the execution engine's own error types and
//! this crate. Any error can sit at the bottom of an error tree; by
//! overriding the provided accessors it opts into up to three independent
//! capabilities:
//!
//! - [`Cause::extensions`]: extension data merged into the formatted error,
//! - [`Cause::path`]: a response path that overrides the enclosing one,
//! - [`Cause::errors`]: child errors, making it an aggregate.
//!
//! Absence of a capability is never an error; the corresponding enrichment
//! step is simply skipped.

use std::error::Error as StdError;
use std::fmt;

use indexmap::IndexMap;

use crate::execution::ExecutionError;
use crate::path::{PathSegment, ResponsePath};

/// Free-form extension data attached to a formatted error.
///
/// Insertion-ordered so serialized output is stable.
pub type Extensions = IndexMap<String, serde_json::Value>;

/// An error that can be wrapped into an [`ExecutionError`].
pub trait Cause: StdError + Send + Sync + 'static {
    /// Extension data to expose to clients.
    fn extensions(&self) -> Option<&Extensions> {
        None
    }

    /// Response path that takes precedence over the enclosing error's path.
    fn path(&self) -> Option<&[PathSegment]> {
        None
    }

    /// Child errors, in declaration order, when this error aggregates several
    /// failures.
    fn errors(&self) -> Option<&[ExecutionError]> {
        None
    }
}

/// A generic error raised by a resolver.
///
/// Carries a message and, optionally, extension data and an overriding
/// response path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    message: String,
    extensions: Extensions,
    path: Option<ResponsePath>,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        ResolverError {
            message: message.into(),
            extensions: Extensions::new(),
            path: None,
        }
    }

    /// Builder: add one extension entry.
    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    /// Builder: replace all extension entries.
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Builder: set the overriding path.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Cause for ResolverError {
    fn extensions(&self) -> Option<&Extensions> {
        if self.extensions.is_empty() {
            None
        } else {
            Some(&self.extensions)
        }
    }

    fn path(&self) -> Option<&[PathSegment]> {
        self.path.as_deref()
    }
}

/// Adapter for foreign error types that expose no capabilities.
pub struct Opaque(Box<dyn StdError + Send + Sync + 'static>);

impl Opaque {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Opaque(Box::new(err))
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Opaque {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl Cause for Opaque {}
