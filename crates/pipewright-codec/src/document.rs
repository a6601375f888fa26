//! Whole-document wire codec
//!
//! A configuration document holds the partition id plus the three entity
//! collections. Unknown top-level keys are ignored on parse; a malformed
//! entity anywhere fails the whole parse.

use crate::error::Result;
use crate::external::ExternalCodec;
use crate::json::JsonObject;
use crate::pipeline::PipelineCodec;
use crate::process::ProcessCodec;
use pipewright_core::Document;
use serde_json::{json, Value};

/// Document wire codec
pub struct DocumentCodec;

impl DocumentCodec {
    /// Parse a configuration document from JSON text
    pub fn parse(text: &str) -> Result<Document> {
        let root: Value = serde_json::from_str(text)?;
        let externals = JsonObject::get_array_or_default(&root, "externalSystems")
            .iter()
            .map(ExternalCodec::decode)
            .collect::<Result<Vec<_>>>()?;
        let processes = JsonObject::get_array_or_default(&root, "processDefinitions")
            .iter()
            .map(ProcessCodec::decode)
            .collect::<Result<Vec<_>>>()?;
        let pipelines = JsonObject::get_array_or_default(&root, "pipelines")
            .iter()
            .map(PipelineCodec::decode)
            .collect::<Result<Vec<_>>>()?;
        Ok(Document {
            partition_uuid: JsonObject::get_string_or_default(&root, "partitionUuid"),
            externals,
            processes,
            pipelines,
        })
    }

    /// Serialize a configuration document to pretty-printed JSON
    pub fn serialize(document: &Document) -> Result<String> {
        let pipelines: Vec<Value> = document.pipelines.iter().map(PipelineCodec::encode).collect();
        let externals: Vec<Value> = document.externals.iter().map(ExternalCodec::encode).collect();
        let processes: Vec<Value> = document.processes.iter().map(ProcessCodec::encode).collect();
        let root = json!({
            "partitionUuid": document.partition_uuid,
            "pipelines": pipelines,
            "externalSystems": externals,
            "processDefinitions": processes,
        });
        Ok(serde_json::to_string_pretty(&root)?)
    }
}
