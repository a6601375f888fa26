//! Pipewright Codec - JSON wire format for configuration documents
//!
//! This crate converts between the typed configuration model in
//! `pipewright-core` and the JSON document format consumed by the pipeline
//! runtime. The wire shapes are conditional (single-key wrappers, family-keyed
//! expressions, kind-dependent argument objects, omitted-when-empty keys), so
//! every codec is written by hand over `serde_json::Value`.

pub mod condition;
pub mod document;
pub mod error;
pub mod external;
pub mod json;
pub mod pipeline;
pub mod process;
pub mod transformer;

// Re-export main codec types
pub use condition::ConditionCodec;
pub use document::DocumentCodec;
pub use error::{CodecError, Result};
pub use external::ExternalCodec;
pub use pipeline::PipelineCodec;
pub use process::ProcessCodec;
pub use transformer::TransformationCodec;
