//! Configuration model definitions
//!
//! This module contains the document entity definitions:
//! - External system descriptors
//! - Process definitions (nine variants)
//! - Transformations
//! - Pipelines
//! - The whole configuration document

pub mod document;
pub mod external;
pub mod pipeline;
pub mod process;
pub mod transformer;

pub use document::Document;
pub use external::{External, ExternalType};
pub use pipeline::{Pipeline, PipelineStep};
pub use process::{
    Aggregation, AggregationType, Aggregator, Annotation, Annotator, Completer, Continuation,
    Entwine, Filter, Process, ProcessKind, Spawner, Tee,
};
pub use transformer::{Transformation, TransformationKind, Transformer};
