//! Response envelope carrying formatted errors.
//!
//! [`ErrorResponse`] is the `{ "data": ..., "errors": [...] }` shape a query
//! endpoint returns. `data` is omitted when there is no partial result and
//! `errors` when nothing failed.

use serde::Serialize;

use gqlerrors_core::{ExecutionError, FormattedError};

use crate::error::FlattenError;
use crate::flatten::{FlattenConfig, Flattener};

/// Standard query response envelope.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorResponse {
    /// Partial result, if execution produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Flattened error records, in reporting order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormattedError>,
}

impl ErrorResponse {
    /// Flatten `err` into a response with no data.
    pub fn from_error(
        err: impl Into<ExecutionError>,
        config: &FlattenConfig,
    ) -> Result<Self, FlattenError> {
        let errors = Flattener::new(config.clone()).flatten(&err.into())?;
        Ok(ErrorResponse { data: None, errors })
    }

    /// Wrap records that were already formatted.
    pub fn from_records(errors: Vec<FormattedError>) -> Self {
        ErrorResponse { data: None, errors }
    }

    /// Builder: attach a partial result.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
