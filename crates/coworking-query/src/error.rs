//! Query error types.

use coworking_core::InvalidDataError;
use thiserror::Error;

/// Error returned when evaluating a report fails.
///
/// An empty or non-matching input is never an error: reports return
/// `Option::None` or an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A precondition on the data was violated during evaluation.
    #[error("invalid data: {0}")]
    InvalidData(#[from] InvalidDataError),
    /// A report parameter is out of range or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// No report with the given name or number.
    #[error("unknown report: {0}")]
    UnknownReport(String),
}
