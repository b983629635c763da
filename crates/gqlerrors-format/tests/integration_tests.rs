//! End-to-end scenarios for error flattening.
//!
//! Each test builds an error tree the way an execution engine would (located
//! errors wrapping resolver failures and aggregates), flattens it, and checks
//! the serialized records a client would receive.

use std::sync::Arc;

use serde_json::json;

use gqlerrors_core::{
    Cause, ExecutionError, Extensions, LocatedError, MultiError, PathSegment, ResolverError,
    SourceLocation,
};
use gqlerrors_format::{flatten, new_formatted_error, normalize, ErrorResponse, FlattenConfig};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// An engine-defined error that reports a path but no extensions.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct FieldPathError {
    message: String,
    path: Vec<PathSegment>,
}

impl Cause for FieldPathError {
    fn path(&self) -> Option<&[PathSegment]> {
        Some(&self.path)
    }
}

/// An engine-defined aggregate, e.g. the result of joining resolver errors.
#[derive(Debug, thiserror::Error)]
#[error("{} errors", .errors.len())]
struct JoinedErrors {
    errors: Vec<ExecutionError>,
}

impl Cause for JoinedErrors {
    fn errors(&self) -> Option<&[ExecutionError]> {
        Some(&self.errors)
    }
}

fn to_json(err: impl Into<ExecutionError>) -> serde_json::Value {
    let response = ErrorResponse::from_error(err, &FlattenConfig::default()).unwrap();
    serde_json::to_value(response).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn aggregate_under_located_error() {
    let path_error = FieldPathError {
        message: "b".into(),
        path: vec!["user".into(), "id".into()],
    };
    let err = LocatedError::new("agg")
        .with_location(2, 5)
        .with_path(["user"])
        .with_cause(MultiError::new(vec![
            ExecutionError::message("a"),
            ExecutionError::from(LocatedError::new("b").with_cause(ExecutionError::plain(path_error))),
        ]));

    assert_eq!(
        to_json(err),
        json!({
            "errors": [
                {
                    "message": "a",
                    "locations": [{ "line": 2, "column": 5 }],
                    "path": ["user"],
                },
                {
                    "message": "b",
                    "locations": [{ "line": 2, "column": 5 }],
                    "path": ["user", "id"],
                },
            ]
        })
    );
}

#[test]
fn engine_defined_aggregate_is_expanded() {
    let joined = JoinedErrors {
        errors: vec![
            ExecutionError::message("first"),
            ExecutionError::from(
                ResolverError::new("second").with_extension("code", json!("INTERNAL")),
            ),
        ],
    };
    let err = LocatedError::new("2 errors")
        .with_location(7, 3)
        .with_path(["orders", "0"])
        .with_cause(ExecutionError::plain(joined));

    let records = flatten(err).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "first");
    assert!(records[0].extensions.is_empty());
    assert_eq!(records[1].message, "second");
    assert_eq!(records[1].extensions.get("code"), Some(&json!("INTERNAL")));
    assert!(records
        .iter()
        .all(|r| r.locations == vec![SourceLocation::new(7, 3)]));
}

#[test]
fn records_keep_original_children_in_order() {
    let children: Vec<ExecutionError> = ["e1", "e2", "e3"]
        .into_iter()
        .map(ExecutionError::message)
        .collect();
    let err = LocatedError::new("agg").with_cause(MultiError::new(children.clone()));

    let records = flatten(err).unwrap();
    assert_eq!(records.len(), 3);
    for (record, child) in records.iter().zip(&children) {
        assert!(record.original_error().unwrap().ptr_eq(child));
    }
}

#[test]
fn bare_aggregate_of_located_errors_keeps_their_own_context() {
    let err = MultiError::new(vec![
        ExecutionError::from(
            LocatedError::new("left")
                .with_location(1, 1)
                .with_path(["left"]),
        ),
        ExecutionError::from(
            LocatedError::new("right")
                .with_location(2, 2)
                .with_path(vec![PathSegment::from("right"), PathSegment::from(0)]),
        ),
        ExecutionError::message("nowhere"),
    ]);

    assert_eq!(
        to_json(err),
        json!({
            "errors": [
                { "message": "left", "locations": [{ "line": 1, "column": 1 }], "path": ["left"] },
                { "message": "right", "locations": [{ "line": 2, "column": 2 }], "path": ["right", 0] },
                { "message": "nowhere" },
            ]
        })
    );
}

#[test]
fn located_error_inside_bare_aggregate_expands_its_own_aggregate() {
    let inner = LocatedError::new("inner")
        .with_location(3, 9)
        .with_path(["inner"])
        .with_cause(MultiError::new(vec![
            ExecutionError::message("x"),
            ExecutionError::message("y"),
        ]));
    let err = MultiError::new(vec![ExecutionError::message("w"), ExecutionError::from(inner)]);

    let records = flatten(err).unwrap();
    let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, ["w", "x", "y"]);
    assert!(records[0].locations.is_empty());
    assert_eq!(records[1].locations, vec![SourceLocation::new(3, 9)]);
    assert_eq!(records[2].path, Some(vec![PathSegment::from("inner")]));
}

#[test]
fn formatted_record_passes_through_flatten() {
    let record = new_formatted_error("pre-formatted");
    let records = flatten(&record).unwrap();
    assert_eq!(records, vec![record]);
}

#[test]
fn extensions_survive_serialization_in_insertion_order() {
    let mut extensions = Extensions::new();
    extensions.insert("code".into(), json!("UNAUTHENTICATED"));
    extensions.insert("retryable".into(), json!(false));

    let err = LocatedError::new("login required")
        .with_location(1, 2)
        .with_cause(ResolverError::new("login required").with_extensions(extensions));

    let record = normalize(err);
    let serialized = serde_json::to_string(&record).unwrap();
    assert_eq!(
        serialized,
        r#"{"message":"login required","locations":[{"line":1,"column":2}],"extensions":{"code":"UNAUTHENTICATED","retryable":false}}"#
    );
}

#[test]
fn trees_can_be_flattened_from_other_threads() {
    let shared = ExecutionError::from(
        LocatedError::new("agg")
            .with_location(1, 1)
            .with_cause(MultiError::new(vec![
                ExecutionError::message("a"),
                ExecutionError::message("b"),
            ])),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let err = shared.clone();
            std::thread::spawn(move || flatten(err).unwrap().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert!(matches!(shared, ExecutionError::Located(ref located) if Arc::strong_count(located) == 1));
}
