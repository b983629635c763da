//! The client-facing error record.
//!
//! [`FormattedError`] is the flat shape placed in the `errors` array of a
//! response. It keeps a back-reference to the error it was built from for
//! local diagnostics; that reference is never serialized and never takes
//! part in equality.

use serde::{Deserialize, Serialize};

use crate::cause::Extensions;
use crate::execution::ExecutionError;
use crate::location::SourceLocation;
use crate::path::ResponsePath;

/// A normalized, serializable error record.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FormattedError {
    /// Human-readable message, taken from the source error's rendering.
    pub message: String,
    /// Positions in the query document. Empty when unknown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    /// Response path of the failing field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,
    /// Additional data for clients, e.g. an error code.
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip)]
    original_error: Option<ExecutionError>,
}

impl FormattedError {
    /// Create a message-only record with no back-reference.
    pub fn new(message: impl Into<String>) -> Self {
        FormattedError {
            message: message.into(),
            locations: Vec::new(),
            path: None,
            extensions: Extensions::new(),
            original_error: None,
        }
    }

    /// Builder: set locations.
    pub fn with_locations(mut self, locations: Vec<SourceLocation>) -> Self {
        self.locations = locations;
        self
    }

    /// Builder: set or clear the path.
    pub fn with_path(mut self, path: Option<ResponsePath>) -> Self {
        self.path = path;
        self
    }

    /// Builder: set extensions.
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Builder: record the error this record was built from.
    pub fn with_original_error(mut self, err: ExecutionError) -> Self {
        self.original_error = Some(err);
        self
    }

    /// The error this record was built from.
    ///
    /// `None` only for records created through [`FormattedError::new`] or
    /// deserialization.
    pub fn original_error(&self) -> Option<&ExecutionError> {
        self.original_error.as_ref()
    }
}

impl PartialEq for FormattedError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.locations == other.locations
            && self.path == other.path
            && self.extensions == other.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;
    use serde_json::json;

    #[test]
    fn message_only_record_omits_optional_fields() {
        let json = serde_json::to_value(FormattedError::new("boom")).unwrap();
        assert_eq!(json, json!({ "message": "boom" }));
    }

    #[test]
    fn full_record_serializes_every_field() {
        let mut extensions = Extensions::new();
        extensions.insert("code".into(), json!("NOT_FOUND"));

        let record = FormattedError::new("user not found")
            .with_locations(vec![SourceLocation::new(2, 5)])
            .with_path(Some(vec![PathSegment::from("user"), PathSegment::from(0)]))
            .with_extensions(extensions)
            .with_original_error(ExecutionError::message("user not found"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "message": "user not found",
                "locations": [{ "line": 2, "column": 5 }],
                "path": ["user", 0],
                "extensions": { "code": "NOT_FOUND" },
            })
        );
    }

    #[test]
    fn equality_ignores_original_error() {
        let a = FormattedError::new("same").with_original_error(ExecutionError::message("one"));
        let b = FormattedError::new("same").with_original_error(ExecutionError::message("two"));
        assert_eq!(a, b);
        assert_ne!(a, FormattedError::new("different"));
    }

    #[test]
    fn deserialized_record_has_no_original_error() {
        let record: FormattedError = serde_json::from_value(json!({
            "message": "late",
            "path": ["a", 1],
        }))
        .unwrap();

        assert_eq!(record.message, "late");
        assert!(record.locations.is_empty());
        assert_eq!(record.path.as_ref().map(Vec::len), Some(2));
        assert!(record.original_error().is_none());
    }

    #[test]
    fn display_is_message() {
        assert_eq!(FormattedError::new("rendered").to_string(), "rendered");
    }
}
