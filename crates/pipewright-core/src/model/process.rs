//! Process definitions
//!
//! A process is a named, reusable unit of stream-processing logic referenced
//! by name from pipelines. There are nine kinds, modeled as one variant each
//! of the `Process` enum. Editing is whole-value: callers clone an entity,
//! modify the clone and commit it back, never mutating a stored value.

use crate::condition::Condition;
use crate::model::transformer::Transformer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The nine process kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessKind {
    Aggregator,
    Annotator,
    Completer,
    Filter,
    Spawner,
    Tee,
    Transformer,
    Continuation,
    Entwine,
}

impl ProcessKind {
    /// The single-key wrapper tag used on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            ProcessKind::Aggregator => "aggregator",
            ProcessKind::Annotator => "annotator",
            ProcessKind::Completer => "completer",
            ProcessKind::Filter => "filter",
            ProcessKind::Spawner => "spawner",
            ProcessKind::Tee => "tee",
            ProcessKind::Transformer => "transformer",
            ProcessKind::Continuation => "continuation",
            ProcessKind::Entwine => "entwine",
        }
    }
}

/// Drop or keep events by regex match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub regex: String,
    /// true keeps matching events, false drops them
    pub keep_matched: bool,
}

impl Filter {
    pub fn new(name: impl Into<String>, regex: impl Into<String>, keep_matched: bool) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
            keep_matched,
        }
    }
}

/// Spawn a local command when an event arrives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub delay_in_ms: u64,
    /// Wait for the spawned command to finish
    pub do_sync: bool,
    pub path_to_exec: String,
    pub command_args: Vec<String>,
}

impl Spawner {
    pub fn new(name: impl Into<String>, path_to_exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            delay_in_ms: 0,
            do_sync: false,
            path_to_exec: path_to_exec.into(),
            command_args: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A single annotation applied by an annotator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub field_key: String,
    pub field_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Annotation {
    pub fn new(field_key: impl Into<String>, field_value: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            field_value: field_value.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Attach constant fields to events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotator {
    pub name: String,
    pub annotations: Vec<Annotation>,
}

impl Annotator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn add_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Supported aggregation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationType {
    Sum,
    Max,
    Min,
    Avg,
    Count,
    DiscreteHistogram,
}

impl AggregationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::Sum => "Sum",
            AggregationType::Max => "Max",
            AggregationType::Min => "Min",
            AggregationType::Avg => "Avg",
            AggregationType::Count => "Count",
            AggregationType::DiscreteHistogram => "DiscreteHistogram",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Sum" => Some(AggregationType::Sum),
            "Max" => Some(AggregationType::Max),
            "Min" => Some(AggregationType::Min),
            "Avg" => Some(AggregationType::Avg),
            "Count" => Some(AggregationType::Count),
            "DiscreteHistogram" => Some(AggregationType::DiscreteHistogram),
            _ => None,
        }
    }
}

/// The aggregation performed by an aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Name of the external used to persist aggregation state
    pub state_store: String,
    pub aggregation_key: String,
    pub aggregation_type: AggregationType,
    pub group_by_keys: Vec<String>,
    /// Checkpoint to the state store asynchronously
    pub async_checkpoint: bool,
    /// Forward aggregation state to downstream processes
    pub forward_state: bool,
}

/// Aggregate event values keyed by field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregator {
    pub name: String,
    pub aggregation: Aggregation,
}

impl Aggregator {
    pub fn new(
        name: impl Into<String>,
        state_store: impl Into<String>,
        aggregation_key: impl Into<String>,
        aggregation_type: AggregationType,
    ) -> Self {
        Self {
            name: name.into(),
            aggregation: Aggregation {
                condition: None,
                state_store: state_store.into(),
                aggregation_key: aggregation_key.into(),
                aggregation_type,
                group_by_keys: Vec::new(),
                async_checkpoint: false,
                forward_state: false,
            },
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.aggregation.condition = Some(condition);
        self
    }

    pub fn with_group_by_keys(mut self, keys: Vec<String>) -> Self {
        self.aggregation.group_by_keys = keys;
        self
    }
}

/// Join partial events until all keys are present or a timeout passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Name of the external used to persist join state
    pub state_store: String,
    pub join_keys: Vec<String>,
    pub timeout_ms: u64,
}

impl Completer {
    pub fn new(name: impl Into<String>, state_store: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            state_store: state_store.into(),
            join_keys: Vec::new(),
            timeout_ms: 0,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Copy events to an output connector, optionally transformed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tee {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Name of the external the copy is written to
    pub output_connector: String,
    /// Optional name of a transformer process applied before writing;
    /// empty means none
    pub transformer_ref: String,
    /// Arbitrary JSON object merged into the outgoing body
    pub additional_body: Value,
}

impl Tee {
    pub fn new(name: impl Into<String>, output_connector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            output_connector: output_connector.into(),
            transformer_ref: String::new(),
            additional_body: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_transformer_ref(mut self, transformer_ref: impl Into<String>) -> Self {
        self.transformer_ref = transformer_ref.into();
        self
    }

    pub fn with_additional_body(mut self, body: Value) -> Self {
        self.additional_body = body;
        self
    }
}

/// Stop the pipeline for an event unless the condition holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continuation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Continuation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Anchor events into an immutable substream backed by external stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entwine {
    pub name: String,
    /// Name of a KVStore-typed external backing the substream state
    pub stream_state_store_ref: String,
    /// Name of an ObjectStore-typed external for blob storage
    pub object_store_ref: String,
    /// Absolute path to the signing PEM file
    pub pem_path: String,
    pub sub_stream_id: String,
    /// Endpoint of the ticker service to anchor with
    pub ticker_endpoint: String,
    /// Processing interval, in messages, between anchor points
    pub ticker_interval: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Entwine {
    pub fn new(
        name: impl Into<String>,
        stream_state_store_ref: impl Into<String>,
        object_store_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stream_state_store_ref: stream_state_store_ref.into(),
            object_store_ref: object_store_ref.into(),
            pem_path: String::new(),
            sub_stream_id: String::new(),
            ticker_endpoint: String::new(),
            ticker_interval: 0,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A process definition of one of the nine kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Process {
    Aggregator(Aggregator),
    Annotator(Annotator),
    Completer(Completer),
    Filter(Filter),
    Spawner(Spawner),
    Tee(Tee),
    Transformer(Transformer),
    Continuation(Continuation),
    Entwine(Entwine),
}

impl Process {
    /// Unique key within the process collection
    pub fn name(&self) -> &str {
        match self {
            Process::Aggregator(p) => &p.name,
            Process::Annotator(p) => &p.name,
            Process::Completer(p) => &p.name,
            Process::Filter(p) => &p.name,
            Process::Spawner(p) => &p.name,
            Process::Tee(p) => &p.name,
            Process::Transformer(p) => &p.name,
            Process::Continuation(p) => &p.name,
            Process::Entwine(p) => &p.name,
        }
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            Process::Aggregator(_) => ProcessKind::Aggregator,
            Process::Annotator(_) => ProcessKind::Annotator,
            Process::Completer(_) => ProcessKind::Completer,
            Process::Filter(_) => ProcessKind::Filter,
            Process::Spawner(_) => ProcessKind::Spawner,
            Process::Tee(_) => ProcessKind::Tee,
            Process::Transformer(_) => ProcessKind::Transformer,
            Process::Continuation(_) => ProcessKind::Continuation,
            Process::Entwine(_) => ProcessKind::Entwine,
        }
    }
}
