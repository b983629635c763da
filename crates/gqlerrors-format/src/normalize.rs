//! Conversion of a single error value into a [`FormattedError`].

use std::sync::Arc;

use gqlerrors_core::{ExecutionError, Extensions, FormattedError, LocatedError, ResolverError};

/// Normalize one error into a formatted record.
///
/// - An already formatted error is returned unchanged.
/// - A located error contributes its message, locations and path. When it
///   wraps a cause, the cause's extensions are attached and the cause's
///   path, if any, replaces the located error's own.
/// - Anything else becomes a message-only record.
///
/// Owned and borrowed located errors are accepted alike. Never fails.
pub fn normalize(err: impl Into<ExecutionError>) -> FormattedError {
    normalize_ref(&err.into())
}

/// Normalize each error independently, preserving order.
///
/// Aggregates are not expanded; use [`crate::flatten`] for that.
pub fn normalize_all<I>(errs: I) -> Vec<FormattedError>
where
    I: IntoIterator,
    I::Item: Into<ExecutionError>,
{
    errs.into_iter().map(normalize).collect()
}

/// Build a record from a bare message, backed by a fresh [`ResolverError`].
pub fn new_formatted_error(message: impl Into<String>) -> FormattedError {
    normalize(ResolverError::new(message))
}

pub(crate) fn normalize_ref(err: &ExecutionError) -> FormattedError {
    match err {
        ExecutionError::Formatted(formatted) => formatted.as_ref().clone(),
        ExecutionError::Located(located) => normalize_located(located),
        other => FormattedError::new(other.to_string()).with_original_error(other.clone()),
    }
}

fn normalize_located(located: &Arc<LocatedError>) -> FormattedError {
    let mut path = located.path.clone();
    let mut extensions = Extensions::new();

    if let Some(cause) = &located.cause {
        if let Some(cause_extensions) = cause.extensions() {
            extensions = cause_extensions.clone();
        }
        // Checked after extensions; the cause's path always wins.
        if let Some(cause_path) = cause.path() {
            path = Some(cause_path.to_vec());
        }
    }

    let original = located
        .cause
        .clone()
        .unwrap_or_else(|| ExecutionError::Located(Arc::clone(located)));

    FormattedError::new(located.message.clone())
        .with_locations(located.locations.clone())
        .with_path(path)
        .with_extensions(extensions)
        .with_original_error(original)
}
