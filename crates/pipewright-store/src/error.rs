//! Store error types

use thiserror::Error;

/// Configuration store error
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document parse or serialize failure
    #[error("Codec error: {0}")]
    CodecError(#[from] pipewright_codec::CodecError),

    /// Entity rejected by create/edit validation
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
