//! Pipeline definitions
//!
//! A pipeline chains process definitions by name, in execution order, with
//! per-step retry and instrumentation policy and an optional checkpoint
//! connector.

use serde::{Deserialize, Serialize};

/// One step of a pipeline: a process reference plus its policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    /// Name of the process definition this step runs
    pub process_ref: String,
    pub num_retries: u32,
    pub initial_backoff_ms: u64,
    pub enable_tracing: bool,
    pub enable_latency: bool,
    pub enable_counter: bool,
}

impl PipelineStep {
    pub fn new(process_ref: impl Into<String>) -> Self {
        Self {
            process_ref: process_ref.into(),
            num_retries: 0,
            initial_backoff_ms: 0,
            enable_tracing: false,
            enable_latency: false,
            enable_counter: false,
        }
    }

    pub fn with_retries(mut self, num_retries: u32, initial_backoff_ms: u64) -> Self {
        self.num_retries = num_retries;
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }
}

/// An ordered chain of process references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique key within the pipeline collection
    pub name: String,
    /// Steps in execution order
    pub processes: Vec<PipelineStep>,
    /// Name of the external used to persist progress markers; `None` means
    /// no checkpointing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_connector_ref: Option<String>,
    pub enable_tracing: bool,
    pub enable_metrics: bool,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            processes: Vec::new(),
            checkpoint_connector_ref: None,
            enable_tracing: false,
            enable_metrics: false,
        }
    }

    pub fn add_step(mut self, step: PipelineStep) -> Self {
        self.processes.push(step);
        self
    }

    /// Set the checkpoint connector; an empty name clears it
    pub fn with_checkpoint(mut self, connector_ref: impl Into<String>) -> Self {
        let connector_ref = connector_ref.into();
        self.checkpoint_connector_ref = if connector_ref.is_empty() {
            None
        } else {
            Some(connector_ref)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_step_order_preserved() {
        let p = Pipeline::new("ingest")
            .add_step(PipelineStep::new("annotate"))
            .add_step(PipelineStep::new("aggregate"))
            .add_step(PipelineStep::new("forward"));
        let refs: Vec<&str> = p.processes.iter().map(|s| s.process_ref.as_str()).collect();
        assert_eq!(refs, vec!["annotate", "aggregate", "forward"]);
    }

    #[test]
    fn test_empty_checkpoint_normalizes_to_none() {
        let p = Pipeline::new("p").with_checkpoint("");
        assert_eq!(p.checkpoint_connector_ref, None);

        let p = Pipeline::new("p").with_checkpoint("kv");
        assert_eq!(p.checkpoint_connector_ref.as_deref(), Some("kv"));
    }

    #[test]
    fn test_step_retry_policy() {
        let s = PipelineStep::new("fetch").with_retries(3, 250);
        assert_eq!(s.num_retries, 3);
        assert_eq!(s.initial_backoff_ms, 250);
        assert!(!s.enable_tracing);
    }
}
