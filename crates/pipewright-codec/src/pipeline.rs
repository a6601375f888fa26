//! Pipeline wire codec
//!
//! Step retry and instrumentation policy nest under `retryStrategy` and
//! `instrumentation`; both default to zero values when absent. The
//! `checkpoint` key is omitted entirely when no checkpoint connector is set.

use crate::error::Result;
use crate::json::JsonObject;
use pipewright_core::{Pipeline, PipelineStep};
use serde_json::{json, Value};

/// Pipeline wire codec
pub struct PipelineCodec;

impl PipelineCodec {
    /// Encode a pipeline definition
    pub fn encode(pipeline: &Pipeline) -> Value {
        let steps: Vec<Value> = pipeline.processes.iter().map(Self::encode_step).collect();
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), json!(pipeline.name));
        body.insert("processes".to_string(), Value::Array(steps));
        if let Some(connector_ref) = &pipeline.checkpoint_connector_ref {
            body.insert(
                "checkpoint".to_string(),
                json!({ "outputConnectorRef": connector_ref }),
            );
        }
        body.insert("enableTracing".to_string(), json!(pipeline.enable_tracing));
        body.insert("enableMetrics".to_string(), json!(pipeline.enable_metrics));
        Value::Object(body)
    }

    /// Decode a pipeline definition
    pub fn decode(value: &Value) -> Result<Pipeline> {
        let processes = JsonObject::get_array_or_default(value, "processes")
            .iter()
            .map(Self::decode_step)
            .collect();
        let checkpoint_connector_ref = JsonObject::get_object(value, "checkpoint")
            .map(|c| JsonObject::get_string_or_default(c, "outputConnectorRef"))
            .filter(|r| !r.is_empty());
        Ok(Pipeline {
            name: JsonObject::get_string(value, "name")?,
            processes,
            checkpoint_connector_ref,
            enable_tracing: JsonObject::get_bool_or_default(value, "enableTracing"),
            enable_metrics: JsonObject::get_bool_or_default(value, "enableMetrics"),
        })
    }

    fn encode_step(step: &PipelineStep) -> Value {
        json!({
            "name": step.process_ref,
            "retryStrategy": {
                "numRetries": step.num_retries,
                "initialBackOffMs": step.initial_backoff_ms,
            },
            "instrumentation": {
                "enableTracing": step.enable_tracing,
                "latency": step.enable_latency,
                "counter": step.enable_counter,
            },
        })
    }

    fn decode_step(value: &Value) -> PipelineStep {
        let retry = JsonObject::get_object(value, "retryStrategy");
        let instrumentation = JsonObject::get_object(value, "instrumentation");
        PipelineStep {
            process_ref: JsonObject::get_string_or_default(value, "name"),
            num_retries: retry
                .map(|r| JsonObject::get_u64_or_default(r, "numRetries") as u32)
                .unwrap_or(0),
            initial_backoff_ms: retry
                .map(|r| JsonObject::get_u64_or_default(r, "initialBackOffMs"))
                .unwrap_or(0),
            enable_tracing: instrumentation
                .map(|i| JsonObject::get_bool_or_default(i, "enableTracing"))
                .unwrap_or(false),
            enable_latency: instrumentation
                .map(|i| JsonObject::get_bool_or_default(i, "latency"))
                .unwrap_or(false),
            enable_counter: instrumentation
                .map(|i| JsonObject::get_bool_or_default(i, "counter"))
                .unwrap_or(false),
        }
    }
}
