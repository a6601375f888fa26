//! Codec error types

use thiserror::Error;

/// Wire codec error
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// The process object carries none of the nine recognized tag keys
    #[error("cannot find process definition type")]
    UnknownProcessType,

    /// Unrecognized external type tag
    #[error("Unknown external type: {0}")]
    UnknownExternalType(String),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
