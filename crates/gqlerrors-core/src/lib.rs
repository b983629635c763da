//! Core data model for GraphQL error formatting.
//!
//! Defines the error values produced during query execution
//! ([`ExecutionError`], [`LocatedError`], [`MultiError`]), the optional
//! capabilities an error can expose through [`Cause`], and the flat
//! client-facing record ([`FormattedError`]) they are normalized into.

pub mod cause;
pub mod execution;
pub mod formatted;
pub mod location;
pub mod path;

// Re-export commonly used types
pub use cause::{Cause, Extensions, Opaque, ResolverError};
pub use execution::{ExecutionError, LocatedError, MultiError};
pub use formatted::FormattedError;
pub use location::SourceLocation;
pub use path::{PathSegment, ResponsePath};
