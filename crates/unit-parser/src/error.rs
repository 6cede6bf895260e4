//! Error types for unit parsing.

use thiserror::Error;

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Empty unit string")]
    Empty,

    /// The string does not follow the unit grammar
    #[error("Could not parse unit '{0}'")]
    Syntax(String),

    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    /// The origin of a `since` unit is not a valid timestamp
    #[error("Invalid reference time '{0}'")]
    InvalidTimestamp(String),

    /// A dimension exponent does not fit the supported range
    #[error("Exponent out of range in '{0}'")]
    ExponentOverflow(String),

    #[error("Unit '{from}' cannot be converted to '{to}'")]
    NotConvertible { from: String, to: String },
}
