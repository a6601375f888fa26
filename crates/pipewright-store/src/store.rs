//! The configuration store
//!
//! Collections are Vec-backed so user-authored order survives edits and
//! round trips: upsert of an existing name replaces the entity in place,
//! upsert of a new name appends.

use crate::check::check_references;
use crate::error::{Result, StoreError};
use pipewright_codec::DocumentCodec;
use pipewright_core::{Document, External, Pipeline, Process};

/// In-memory working copy of a configuration document
#[derive(Debug, Default, Clone)]
pub struct ConfigStore {
    partition_uuid: String,
    externals: Vec<External>,
    processes: Vec<Process>,
    pipelines: Vec<Pipeline>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition_uuid(&self) -> &str {
        &self.partition_uuid
    }

    pub fn set_partition_uuid(&mut self, partition_uuid: impl Into<String>) {
        self.partition_uuid = partition_uuid.into();
    }

    /// Externals in insertion order
    pub fn externals(&self) -> &[External] {
        &self.externals
    }

    /// Process definitions in insertion order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Pipelines in insertion order
    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
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

    /// Validate an external against the collection. Creation requires a
    /// fresh name; edits keep their name, so no uniqueness check applies.
    pub fn validate_external(&self, external: &External, is_edit: bool) -> Option<String> {
        Self::validate_name(&external.name, is_edit, self.find_external(&external.name).is_some())
    }

    pub fn validate_process(&self, process: &Process, is_edit: bool) -> Option<String> {
        Self::validate_name(process.name(), is_edit, self.find_process(process.name()).is_some())
    }

    pub fn validate_pipeline(&self, pipeline: &Pipeline, is_edit: bool) -> Option<String> {
        Self::validate_name(&pipeline.name, is_edit, self.find_pipeline(&pipeline.name).is_some())
    }

    fn validate_name(name: &str, is_edit: bool, taken: bool) -> Option<String> {
        if !is_edit && taken {
            return Some(format!("invalid name: {name}"));
        }
        None
    }

    /// Replace the external with the same name, or append
    pub fn upsert_external(&mut self, external: External) {
        match self.externals.iter_mut().find(|e| e.name == external.name) {
            Some(slot) => *slot = external,
            None => self.externals.push(external),
        }
    }

    pub fn upsert_process(&mut self, process: Process) {
        match self.processes.iter_mut().find(|p| p.name() == process.name()) {
            Some(slot) => *slot = process,
            None => self.processes.push(process),
        }
    }

    pub fn upsert_pipeline(&mut self, pipeline: Pipeline) {
        match self.pipelines.iter_mut().find(|p| p.name == pipeline.name) {
            Some(slot) => *slot = pipeline,
            None => self.pipelines.push(pipeline),
        }
    }

    /// Validate then upsert; a validation failure leaves the store untouched
    pub fn commit_external(&mut self, external: External, is_edit: bool) -> Result<()> {
        if let Some(message) = self.validate_external(&external, is_edit) {
            return Err(StoreError::ValidationFailed(message));
        }
        self.upsert_external(external);
        Ok(())
    }

    pub fn commit_process(&mut self, process: Process, is_edit: bool) -> Result<()> {
        if let Some(message) = self.validate_process(&process, is_edit) {
            return Err(StoreError::ValidationFailed(message));
        }
        self.upsert_process(process);
        Ok(())
    }

    pub fn commit_pipeline(&mut self, pipeline: Pipeline, is_edit: bool) -> Result<()> {
        if let Some(message) = self.validate_pipeline(&pipeline, is_edit) {
            return Err(StoreError::ValidationFailed(message));
        }
        self.upsert_pipeline(pipeline);
        Ok(())
    }

    pub fn remove_external(&mut self, name: &str) -> Option<External> {
        let idx = self.externals.iter().position(|e| e.name == name)?;
        Some(self.externals.remove(idx))
    }

    pub fn remove_process(&mut self, name: &str) -> Option<Process> {
        let idx = self.processes.iter().position(|p| p.name() == name)?;
        Some(self.processes.remove(idx))
    }

    pub fn remove_pipeline(&mut self, name: &str) -> Option<Pipeline> {
        let idx = self.pipelines.iter().position(|p| p.name == name)?;
        Some(self.pipelines.remove(idx))
    }

    /// Parse a document and replace the whole store state with it. A parse
    /// failure leaves the current state untouched.
    pub fn load(&mut self, text: &str) -> Result<()> {
        let document = DocumentCodec::parse(text)?;
        log::debug!(
            "loading document: {} externals, {} processes, {} pipelines",
            document.externals.len(),
            document.processes.len(),
            document.pipelines.len()
        );
        self.partition_uuid = document.partition_uuid;
        self.externals = document.externals;
        self.processes = document.processes;
        self.pipelines = document.pipelines;
        Ok(())
    }

    /// Serialize the current state to pretty-printed JSON
    pub fn dump(&self) -> Result<String> {
        Ok(DocumentCodec::serialize(&self.to_document())?)
    }

    /// Snapshot the store as a document value
    pub fn to_document(&self) -> Document {
        Document {
            partition_uuid: self.partition_uuid.clone(),
            externals: self.externals.clone(),
            processes: self.processes.clone(),
            pipelines: self.pipelines.clone(),
        }
    }

    /// Report referential-integrity problems in the current state
    pub fn check(&self) -> Vec<String> {
        check_references(&self.to_document())
    }
}
