//! The whole configuration document
//!
//! A document aggregates externals, process definitions and pipelines, plus
//! partition metadata. Each collection is ordered (the order is
//! user-authored and survives round trips) and keyed by unique name.
//! Cross-collection references are by name and deliberately soft: the model
//! accepts a dangling reference, and document-level checking reports it.

use crate::model::external::External;
use crate::model::pipeline::Pipeline;
use crate::model::process::Process;
use serde::{Deserialize, Serialize};

/// A complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub partition_uuid: String,
    pub externals: Vec<External>,
    pub processes: Vec<Process>,
    pub pipelines: Vec<Pipeline>,
}

impl Document {
    pub fn new(partition_uuid: impl Into<String>) -> Self {
        Self {
            partition_uuid: partition_uuid.into(),
            externals: Vec::new(),
            processes: Vec::new(),
            pipelines: Vec::new(),
        }
    }

    pub fn find_external(&self, name: &str) -> Option<&External> {
        self.externals.iter().find(|e| e.name == name)
    }

    pub fn find_process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name() == name)
    }

    pub fn find_pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name == name)
    }
}
