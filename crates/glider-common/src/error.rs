//! Error types for the glider DAC checks.

use thiserror::Error;

/// Result type alias using GliderError.
pub type GliderResult<T> = Result<T, GliderError>;

/// Errors that abort a check.
///
/// Metadata problems in the dataset are never errors: they are scored and
/// reported through [`crate::Tally`] messages.
#[derive(Debug, Error)]
pub enum GliderError {
    /// An authority table needed by a check could not be loaded.
    #[error("Was unable to fetch {0} table")]
    TableUnavailable(String),

    #[error("Invalid data type: {0}")]
    InvalidDType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
