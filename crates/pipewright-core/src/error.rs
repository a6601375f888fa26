//! Error types for Pipewright Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown type name: {0}")]
    UnknownTypeName(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
