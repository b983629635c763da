//! Normalization and flattening of execution errors.
//!
//! Provides two levels of conversion:
//! - [`normalize`]: turns one error value into one [`FormattedError`],
//!   enriching it with the extension and path capabilities of its cause.
//! - [`flatten`]: expands aggregate errors into one record per leaf, in
//!   depth-first, left-to-right order, passing the enclosing located error's
//!   locations and path down to the expanded children.
//!
//! Both are pure functions of their input.

pub mod error;
pub mod flatten;
pub mod normalize;
pub mod response;

pub use error::FlattenError;
pub use flatten::{flatten, FlattenConfig, Flattener};
pub use normalize::{new_formatted_error, normalize, normalize_all};
pub use response::ErrorResponse;

pub use gqlerrors_core::{ExecutionError, FormattedError};
