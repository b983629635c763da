//! Response paths identifying the field or list item where an error occurred.
//!
//! A path is a sequence of [`PathSegment`]s: object keys and list indices,
//! serialized as a JSON array of strings and integers (`["user", 0, "id"]`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step in a response path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Index into a list field.
    Index(usize),
    /// Name (or alias) of an object field.
    Key(String),
}

/// Ordered path from the response root to the failing field.
pub type ResponsePath = Vec<PathSegment>;

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}
