//! Process wire codec
//!
//! Every process definition serializes as a single-key object whose key names
//! the kind (`filter`, `spawner`, ...). Decoding probes the nine tags in a
//! fixed order; an object carrying none of them is a fatal decode error.

use crate::condition::ConditionCodec;
use crate::error::{CodecError, Result};
use crate::json::JsonObject;
use crate::transformer::TransformationCodec;
use pipewright_core::model::{
    Aggregation, AggregationType, Aggregator, Annotation, Annotator, Completer, Continuation,
    Entwine, Filter, Spawner, Tee, Transformer,
};
use pipewright_core::Process;
use serde_json::{json, Value};

/// Process wire codec
pub struct ProcessCodec;

impl ProcessCodec {
    /// Encode a process definition under its kind tag
    pub fn encode(process: &Process) -> Value {
        let tag = process.kind().tag();
        let body = match process {
            Process::Aggregator(p) => Self::encode_aggregator(p),
            Process::Annotator(p) => Self::encode_annotator(p),
            Process::Completer(p) => Self::encode_completer(p),
            Process::Filter(p) => Self::encode_filter(p),
            Process::Spawner(p) => Self::encode_spawner(p),
            Process::Tee(p) => Self::encode_tee(p),
            Process::Transformer(p) => Self::encode_transformer(p),
            Process::Continuation(p) => Self::encode_continuation(p),
            Process::Entwine(p) => Self::encode_entwine(p),
        };
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(tag.to_string(), body);
        Value::Object(wrapper)
    }

    /// Decode a process definition, discriminating on the kind tag
    pub fn decode(value: &Value) -> Result<Process> {
        if let Some(body) = JsonObject::get_object(value, "aggregator") {
            return Ok(Process::Aggregator(Self::decode_aggregator(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "annotator") {
            return Ok(Process::Annotator(Self::decode_annotator(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "completer") {
            return Ok(Process::Completer(Self::decode_completer(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "filter") {
            return Ok(Process::Filter(Self::decode_filter(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "spawner") {
            return Ok(Process::Spawner(Self::decode_spawner(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "tee") {
            return Ok(Process::Tee(Self::decode_tee(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "transformer") {
            return Ok(Process::Transformer(Self::decode_transformer(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "continuation") {
            return Ok(Process::Continuation(Self::decode_continuation(body)?));
        }
        if let Some(body) = JsonObject::get_object(value, "entwine") {
            return Ok(Process::Entwine(Self::decode_entwine(body)?));
        }
        Err(CodecError::UnknownProcessType)
    }

    fn encode_filter(p: &Filter) -> Value {
        json!({
            "name": p.name,
            "regex": p.regex,
            "keepMatched": p.keep_matched,
        })
    }

    fn decode_filter(body: &Value) -> Result<Filter> {
        Ok(Filter {
            name: JsonObject::get_string(body, "name")?,
            regex: JsonObject::get_string_or_default(body, "regex"),
            keep_matched: JsonObject::get_bool_or_default(body, "keepMatched"),
        })
    }

    fn encode_spawner(p: &Spawner) -> Value {
        json!({
            "name": p.name,
            "condition": ConditionCodec::encode(p.condition.as_ref()),
            "delayInMs": p.delay_in_ms,
            "doSync": p.do_sync,
            "job": {
                "runnable": {
                    "pathToExec": p.path_to_exec,
                    "cmdArgs": p.command_args,
                }
            },
        })
    }

    fn decode_spawner(body: &Value) -> Result<Spawner> {
        let runnable = JsonObject::get_object(body, "job")
            .and_then(|job| JsonObject::get_object(job, "runnable"));
        Ok(Spawner {
            name: JsonObject::get_string(body, "name")?,
            condition: ConditionCodec::decode(body.get("condition")),
            delay_in_ms: JsonObject::get_u64_or_default(body, "delayInMs"),
            do_sync: JsonObject::get_bool_or_default(body, "doSync"),
            path_to_exec: runnable
                .map(|r| JsonObject::get_string_or_default(r, "pathToExec"))
                .unwrap_or_default(),
            command_args: runnable
                .map(|r| JsonObject::get_string_array_or_default(r, "cmdArgs"))
                .unwrap_or_default(),
        })
    }

    fn encode_annotator(p: &Annotator) -> Value {
        let annotations: Vec<Value> = p
            .annotations
            .iter()
            .map(|a| {
                json!({
                    "fieldKey": a.field_key,
                    "value": a.field_value,
                    "condition": ConditionCodec::encode(a.condition.as_ref()),
                })
            })
            .collect();
        json!({
            "name": p.name,
            "annotations": annotations,
        })
    }

    fn decode_annotator(body: &Value) -> Result<Annotator> {
        let annotations = JsonObject::get_array_or_default(body, "annotations")
            .iter()
            .map(|a| Annotation {
                field_key: JsonObject::get_string_or_default(a, "fieldKey"),
                field_value: JsonObject::get_string_or_default(a, "value"),
                condition: ConditionCodec::decode(a.get("condition")),
            })
            .collect();
        Ok(Annotator {
            name: JsonObject::get_string(body, "name")?,
            annotations,
        })
    }

    fn encode_aggregator(p: &Aggregator) -> Value {
        json!({
            "name": p.name,
            "condition": ConditionCodec::encode(p.aggregation.condition.as_ref()),
            "stateStore": p.aggregation.state_store,
            "asyncCheckpoint": p.aggregation.async_checkpoint,
            "forwardState": p.aggregation.forward_state,
            "aggregation": {
                "key": p.aggregation.aggregation_key,
                "aggregationType": p.aggregation.aggregation_type.as_str(),
                "groupByKeys": p.aggregation.group_by_keys,
            },
        })
    }

    fn decode_aggregator(body: &Value) -> Result<Aggregator> {
        let aggregation = JsonObject::get_object(body, "aggregation");
        let type_str = aggregation
            .map(|a| JsonObject::get_string_or_default(a, "aggregationType"))
            .unwrap_or_default();
        let aggregation_type =
            AggregationType::parse(&type_str).ok_or_else(|| CodecError::InvalidValue {
                field: "aggregationType".to_string(),
                message: format!("unknown aggregation type: {type_str}"),
            })?;
        Ok(Aggregator {
            name: JsonObject::get_string(body, "name")?,
            aggregation: Aggregation {
                condition: ConditionCodec::decode(body.get("condition")),
                state_store: JsonObject::get_string_or_default(body, "stateStore"),
                aggregation_key: aggregation
                    .map(|a| JsonObject::get_string_or_default(a, "key"))
                    .unwrap_or_default(),
                aggregation_type,
                group_by_keys: aggregation
                    .map(|a| JsonObject::get_string_array_or_default(a, "groupByKeys"))
                    .unwrap_or_default(),
                async_checkpoint: JsonObject::get_bool_or_default(body, "asyncCheckpoint"),
                forward_state: JsonObject::get_bool_or_default(body, "forwardState"),
            },
        })
    }

    fn encode_completer(p: &Completer) -> Value {
        json!({
            "name": p.name,
            "condition": ConditionCodec::encode(p.condition.as_ref()),
            "stateStore": p.state_store,
            "completion": {
                "joinKeys": p.join_keys,
                "timeoutMs": p.timeout_ms,
            },
        })
    }

    fn decode_completer(body: &Value) -> Result<Completer> {
        let completion = JsonObject::get_object(body, "completion");
        Ok(Completer {
            name: JsonObject::get_string(body, "name")?,
            condition: ConditionCodec::decode(body.get("condition")),
            state_store: JsonObject::get_string_or_default(body, "stateStore"),
            join_keys: completion
                .map(|c| JsonObject::get_string_array_or_default(c, "joinKeys"))
                .unwrap_or_default(),
            timeout_ms: completion
                .map(|c| JsonObject::get_u64_or_default(c, "timeoutMs"))
                .unwrap_or_default(),
        })
    }

    fn encode_tee(p: &Tee) -> Value {
        json!({
            "name": p.name,
            "condition": ConditionCodec::encode(p.condition.as_ref()),
            "outputConnectorRef": p.output_connector,
            "transformerRef": p.transformer_ref,
            "additionalBody": p.additional_body,
        })
    }

    fn decode_tee(body: &Value) -> Result<Tee> {
        Ok(Tee {
            name: JsonObject::get_string(body, "name")?,
            condition: ConditionCodec::decode(body.get("condition")),
            output_connector: JsonObject::get_string_or_default(body, "outputConnectorRef"),
            transformer_ref: JsonObject::get_string_or_default(body, "transformerRef"),
            additional_body: body
                .get("additionalBody")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        })
    }

    fn encode_transformer(p: &Transformer) -> Value {
        let specs: Vec<Value> = p.transformations.iter().map(TransformationCodec::encode).collect();
        json!({
            "name": p.name,
            "specs": specs,
            "forwardInputFields": p.forward_input_fields,
        })
    }

    fn decode_transformer(body: &Value) -> Result<Transformer> {
        let transformations = JsonObject::get_array_or_default(body, "specs")
            .iter()
            .map(TransformationCodec::decode)
            .collect::<Result<Vec<_>>>()?;
        Ok(Transformer {
            name: JsonObject::get_string(body, "name")?,
            transformations,
            forward_input_fields: JsonObject::get_bool_or_default(body, "forwardInputFields"),
        })
    }

    fn encode_continuation(p: &Continuation) -> Value {
        json!({
            "name": p.name,
            "condition": ConditionCodec::encode(p.condition.as_ref()),
        })
    }

    fn decode_continuation(body: &Value) -> Result<Continuation> {
        Ok(Continuation {
            name: JsonObject::get_string(body, "name")?,
            condition: ConditionCodec::decode(body.get("condition")),
        })
    }

    fn encode_entwine(p: &Entwine) -> Value {
        json!({
            "name": p.name,
            "streamStateStore": p.stream_state_store_ref,
            "objectStore": p.object_store_ref,
            "pemPath": p.pem_path,
            "subStreamID": p.sub_stream_id,
            "tickerEndpoint": p.ticker_endpoint,
            "tickerInterval": p.ticker_interval,
            "condition": ConditionCodec::encode(p.condition.as_ref()),
        })
    }

    fn decode_entwine(body: &Value) -> Result<Entwine> {
        Ok(Entwine {
            name: JsonObject::get_string(body, "name")?,
            stream_state_store_ref: JsonObject::get_string_or_default(body, "streamStateStore"),
            object_store_ref: JsonObject::get_string_or_default(body, "objectStore"),
            pem_path: JsonObject::get_string_or_default(body, "pemPath"),
            sub_stream_id: JsonObject::get_string_or_default(body, "subStreamID"),
            ticker_endpoint: JsonObject::get_string_or_default(body, "tickerEndpoint"),
            ticker_interval: JsonObject::get_u64_or_default(body, "tickerInterval"),
            condition: ConditionCodec::decode(body.get("condition")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipewright_core::condition::operator::{ComparatorOperator, ExistsOperator};
    use pipewright_core::Condition;
    use serde_json::json;

    #[test]
    fn test_filter_wire_shape() {
        let p = Process::Filter(Filter::new("drop_debug", "^DEBUG", false));
        let wire = ProcessCodec::encode(&p);
        assert_eq!(
            wire,
            json!({"filter": {"name": "drop_debug", "regex": "^DEBUG", "keepMatched": false}})
        );
    }

    #[test]
    fn test_spawner_nests_job_runnable() {
        let mut s = Spawner::new("notify", "/usr/bin/notify.sh");
        s.command_args = vec!["-v".to_string()];
        let wire = ProcessCodec::encode(&Process::Spawner(s));
        assert_eq!(wire["spawner"]["job"]["runnable"]["pathToExec"], "/usr/bin/notify.sh");
        assert_eq!(wire["spawner"]["job"]["runnable"]["cmdArgs"], json!(["-v"]));
    }

    #[test]
    fn test_spawner_decode_without_job_defaults_empty() {
        let wire = json!({"spawner": {"name": "bare", "condition": {}}});
        let p = ProcessCodec::decode(&wire).unwrap();
        match p {
            Process::Spawner(s) => {
                assert!(s.path_to_exec.is_empty());
                assert!(s.command_args.is_empty());
                assert_eq!(s.delay_in_ms, 0);
                assert!(!s.do_sync);
            }
            other => panic!("expected spawner, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tag_is_fatal() {
        let err = ProcessCodec::decode(&json!({"name": "untagged"})).unwrap_err();
        assert_eq!(err.to_string(), "cannot find process definition type");
    }

    #[test]
    fn test_name_is_required() {
        assert!(ProcessCodec::decode(&json!({"filter": {"regex": ".*"}})).is_err());
    }

    #[test]
    fn test_condition_absent_decodes_to_none() {
        let wire = json!({"continuation": {"name": "gate", "condition": {}}});
        match ProcessCodec::decode(&wire).unwrap() {
            Process::Continuation(c) => assert!(c.condition.is_none()),
            other => panic!("expected continuation, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregator_round_trip() {
        let p = Process::Aggregator(
            Aggregator::new("count_errors", "kv", "errors", AggregationType::Count)
                .with_condition(Condition::exists(ExistsOperator::Exists, "error"))
                .with_group_by_keys(vec!["host".to_string()]),
        );
        let wire = ProcessCodec::encode(&p);
        assert_eq!(wire["aggregator"]["aggregation"]["aggregationType"], "Count");
        assert_eq!(ProcessCodec::decode(&wire).unwrap(), p);
    }

    #[test]
    fn test_every_variant_round_trips() {
        let cond = Condition::comparator(ComparatorOperator::GreaterThan, "[amount]", "100");
        let mut completer = Completer::new("join", "kv").with_condition(cond.clone());
        completer.join_keys = vec!["order_id".to_string()];
        completer.timeout_ms = 5000;
        let mut entwine = Entwine::new("anchor", "kv", "blobs").with_condition(cond.clone());
        entwine.ticker_interval = 10;
        entwine.sub_stream_id = "s1".to_string();
        let processes = vec![
            Process::Filter(Filter::new("f", "^x", true)),
            Process::Spawner(Spawner::new("s", "/bin/true").with_condition(cond.clone())),
            Process::Annotator(
                Annotator::new("a")
                    .add_annotation(Annotation::new("env", "prod").with_condition(cond.clone())),
            ),
            Process::Aggregator(Aggregator::new("agg", "kv", "k", AggregationType::Avg)),
            Process::Completer(completer),
            Process::Tee(
                Tee::new("t", "sink")
                    .with_transformer_ref("xform")
                    .with_additional_body(json!({"source": "edge"})),
            ),
            Process::Transformer(Transformer::new("xform")),
            Process::Continuation(Continuation::new("gate").with_condition(cond)),
            Process::Entwine(entwine),
        ];
        for p in processes {
            let wire = ProcessCodec::encode(&p);
            assert_eq!(ProcessCodec::decode(&wire).unwrap(), p, "variant {:?}", p.kind());
        }
    }
}
