//! Pipewright Core - configuration model for stream-processing pipelines
//!
//! This crate provides the typed configuration document that the rest of the
//! Pipewright ecosystem edits, validates and serializes:
//! - Conditions (unary/binary/logical/comparator/exists expressions)
//! - The nine process definition variants
//! - External system descriptors
//! - Pipelines and the whole configuration document
//! - Error types

pub mod condition;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use condition::{Condition, OperandKind, OperatorType};
pub use error::CoreError;
pub use model::document::Document;
pub use model::external::{External, ExternalType};
pub use model::pipeline::{Pipeline, PipelineStep};
pub use model::process::Process;
