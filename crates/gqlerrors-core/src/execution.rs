//! Error values produced by the execution engine.
//!
//! [`ExecutionError`] is the sum type every formatter operation accepts. Its
//! variants share their payload through `Arc`, so cloning a tree (or a
//! subtree) is cheap and error values can move freely between threads.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::cause::{Cause, Extensions, Opaque, ResolverError};
use crate::formatted::FormattedError;
use crate::location::SourceLocation;
use crate::path::{PathSegment, ResponsePath};

/// Any error value reaching the formatting layer.
#[derive(Debug, Clone)]
pub enum ExecutionError {
    /// An unstructured error; capabilities come from the [`Cause`] impl.
    Plain(Arc<dyn Cause>),
    /// An error carrying source locations and a response path.
    Located(Arc<LocatedError>),
    /// Several independent errors reported together.
    Multi(Arc<MultiError>),
    /// An error that has already been formatted.
    Formatted(Arc<FormattedError>),
}

impl ExecutionError {
    /// Wrap a [`Cause`] implementation as a plain error.
    pub fn plain<C: Cause>(cause: C) -> Self {
        ExecutionError::Plain(Arc::new(cause))
    }

    /// Plain error with just a message.
    pub fn message(message: impl Into<String>) -> Self {
        ExecutionError::plain(ResolverError::new(message))
    }

    /// Plain error wrapping a foreign error type with no capabilities.
    pub fn opaque<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ExecutionError::plain(Opaque::new(err))
    }

    /// Extension-providing capability.
    ///
    /// A located error forwards to its cause; a formatted error exposes its
    /// extensions when it has any.
    pub fn extensions(&self) -> Option<&Extensions> {
        match self {
            ExecutionError::Plain(cause) => cause.extensions(),
            ExecutionError::Located(located) => {
                located.cause.as_ref().and_then(ExecutionError::extensions)
            }
            ExecutionError::Multi(_) => None,
            ExecutionError::Formatted(formatted) => {
                if formatted.extensions.is_empty() {
                    None
                } else {
                    Some(&formatted.extensions)
                }
            }
        }
    }

    /// Path-providing capability.
    ///
    /// A located error provides its effective path (see
    /// [`LocatedError::effective_path`]).
    pub fn path(&self) -> Option<&[PathSegment]> {
        match self {
            ExecutionError::Plain(cause) => cause.path(),
            ExecutionError::Located(located) => located.effective_path(),
            ExecutionError::Multi(_) => None,
            ExecutionError::Formatted(formatted) => formatted.path.as_deref(),
        }
    }

    /// Multi-error capability: the child errors in declaration order.
    ///
    /// Located and formatted errors are never aggregates themselves, even
    /// when their cause is.
    pub fn errors(&self) -> Option<&[ExecutionError]> {
        match self {
            ExecutionError::Plain(cause) => cause.errors(),
            ExecutionError::Multi(multi) => Some(multi.errors.as_slice()),
            ExecutionError::Located(_) | ExecutionError::Formatted(_) => None,
        }
    }

    pub fn as_located(&self) -> Option<&LocatedError> {
        match self {
            ExecutionError::Located(located) => Some(located.as_ref()),
            _ => None,
        }
    }

    /// Whether two values share the same underlying allocation.
    pub fn ptr_eq(&self, other: &ExecutionError) -> bool {
        match (self, other) {
            (ExecutionError::Plain(a), ExecutionError::Plain(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (ExecutionError::Located(a), ExecutionError::Located(b)) => Arc::ptr_eq(a, b),
            (ExecutionError::Multi(a), ExecutionError::Multi(b)) => Arc::ptr_eq(a, b),
            (ExecutionError::Formatted(a), ExecutionError::Formatted(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Plain(cause) => fmt::Display::fmt(cause, f),
            ExecutionError::Located(located) => fmt::Display::fmt(located, f),
            ExecutionError::Multi(multi) => fmt::Display::fmt(multi, f),
            ExecutionError::Formatted(formatted) => f.write_str(&formatted.message),
        }
    }
}

impl StdError for ExecutionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ExecutionError::Plain(cause) => cause.source(),
            ExecutionError::Located(located) => located.source(),
            ExecutionError::Multi(_) | ExecutionError::Formatted(_) => None,
        }
    }
}

/// An execution error with position metadata and an optional wrapped cause.
#[derive(Debug, Clone)]
pub struct LocatedError {
    pub message: String,
    /// Where in the query document the error occurred; may be empty.
    pub locations: Vec<SourceLocation>,
    /// Which response field the error belongs to.
    pub path: Option<ResponsePath>,
    /// The original error raised by a resolver.
    pub cause: Option<ExecutionError>,
}

impl LocatedError {
    pub fn new(message: impl Into<String>) -> Self {
        LocatedError {
            message: message.into(),
            locations: Vec::new(),
            path: None,
            cause: None,
        }
    }

    /// Wrap `cause`, taking its rendered text as the message.
    pub fn from_cause(cause: impl Into<ExecutionError>) -> Self {
        let cause = cause.into();
        LocatedError {
            message: cause.to_string(),
            locations: Vec::new(),
            path: None,
            cause: Some(cause),
        }
    }

    /// Builder: set locations.
    pub fn with_locations(mut self, locations: Vec<SourceLocation>) -> Self {
        self.locations = locations;
        self
    }

    /// Builder: append a single location.
    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.locations.push(SourceLocation::new(line, column));
        self
    }

    /// Builder: set the response path.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: set the wrapped cause.
    pub fn with_cause(mut self, cause: impl Into<ExecutionError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The path this error reports: its cause's path when the cause provides
    /// one, otherwise its own.
    pub fn effective_path(&self) -> Option<&[PathSegment]> {
        self.cause
            .as_ref()
            .and_then(ExecutionError::path)
            .or(self.path.as_deref())
    }
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for LocatedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Several independent errors, kept in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct MultiError {
    pub errors: Vec<ExecutionError>,
}

impl MultiError {
    pub fn new(errors: Vec<ExecutionError>) -> Self {
        MultiError { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Renders every child on its own line.
///
/// Nested aggregates are walked with an explicit stack, so rendering depth
/// does not depend on nesting depth.
impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.errors.iter(), true)];
        loop {
            let Some((siblings, first)) = stack.last_mut() else {
                break;
            };
            let Some(err) = siblings.next() else {
                stack.pop();
                continue;
            };
            if !std::mem::replace(first, false) {
                f.write_str("\n")?;
            }
            match err {
                ExecutionError::Multi(multi) => stack.push((multi.errors.iter(), true)),
                other => fmt::Display::fmt(other, f)?,
            }
        }
        Ok(())
    }
}

impl StdError for MultiError {}

// Uniquely owned nested aggregates are unlinked one level at a time so that
// dropping a deep chain does not recurse.
impl Drop for MultiError {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.errors);
        while let Some(err) = pending.pop() {
            if let ExecutionError::Multi(multi) = err {
                if let Some(mut inner) = Arc::into_inner(multi) {
                    pending.append(&mut inner.errors);
                }
            }
        }
    }
}

impl<E: Into<ExecutionError>> FromIterator<E> for MultiError {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        MultiError::new(iter.into_iter().map(Into::into).collect())
    }
}

// Conversions into ExecutionError. Borrowed forms clone the value so that
// callers holding either an owned error or a reference get identical results.

impl From<LocatedError> for ExecutionError {
    fn from(err: LocatedError) -> Self {
        ExecutionError::Located(Arc::new(err))
    }
}

impl From<&LocatedError> for ExecutionError {
    fn from(err: &LocatedError) -> Self {
        ExecutionError::Located(Arc::new(err.clone()))
    }
}

impl From<MultiError> for ExecutionError {
    fn from(err: MultiError) -> Self {
        ExecutionError::Multi(Arc::new(err))
    }
}

impl From<&MultiError> for ExecutionError {
    fn from(err: &MultiError) -> Self {
        ExecutionError::Multi(Arc::new(err.clone()))
    }
}

impl From<FormattedError> for ExecutionError {
    fn from(err: FormattedError) -> Self {
        ExecutionError::Formatted(Arc::new(err))
    }
}

impl From<&FormattedError> for ExecutionError {
    fn from(err: &FormattedError) -> Self {
        ExecutionError::Formatted(Arc::new(err.clone()))
    }
}

impl From<ResolverError> for ExecutionError {
    fn from(err: ResolverError) -> Self {
        ExecutionError::plain(err)
    }
}

impl From<&ExecutionError> for ExecutionError {
    fn from(err: &ExecutionError) -> Self {
        err.clone()
    }
}
