//! CLI error types with exit code mapping.

use thiserror::Error;

use gqlerrors_format::FlattenError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid error tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

impl CliError {
    /// Process exit code: 1 = depth limit exceeded, 3 = I/O or parse failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Flatten(_) => 1,
            CliError::Io(_) | CliError::Json(_) => 3,
        }
    }
}
