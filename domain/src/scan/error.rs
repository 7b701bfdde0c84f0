//! Scan validation errors

use thiserror::Error;

/// Errors raised while validating a scan request.
///
/// All of these are detected before the filesystem is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Pattern must be a non-empty string")]
    EmptyPattern,

    #[error("{field} must be a positive integer")]
    InvalidLimit { field: &'static str },

    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}
