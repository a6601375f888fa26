//! Unit tests for the JSON wire codecs
//!
//! Covers condition encoding across operator families and operand classes,
//! process tag discrimination and per-variant round trips, and whole-document
//! parse/serialize behavior.

use pipewright_codec::*;
use pipewright_core::condition::operator::{
    BinaryOperator, ComparatorOperator, ExistsOperator, LogicalOperator, UnaryOperator,
};
use pipewright_core::model::*;
use pipewright_core::Condition;
use serde_json::json;

// =============================================================================
// Condition Codec Tests
// =============================================================================

#[test]
fn test_condition_round_trip_all_families_and_operand_classes() {
    let operands = ["[field]", "42", "plain text"];
    for lhs in operands {
        for rhs in operands {
            let conditions = vec![
                Condition::binary(BinaryOperator::Addition, lhs, rhs),
                Condition::logical(LogicalOperator::Or, lhs, rhs),
                Condition::comparator(ComparatorOperator::LessThanOrEqual, lhs, rhs),
            ];
            for c in conditions {
                let wire = ConditionCodec::encode(Some(&c));
                assert_eq!(
                    ConditionCodec::decode(Some(&wire)),
                    Some(c.clone()),
                    "failed for {c}"
                );
            }
        }
    }
}

#[test]
fn test_condition_round_trip_every_operator() {
    let mut conditions = Vec::new();
    for op in [
        UnaryOperator::Negation,
        UnaryOperator::Inversion,
        UnaryOperator::LogicalNot,
    ] {
        conditions.push(Condition::unary(op, "[x]"));
    }
    for op in [
        BinaryOperator::Addition,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Power,
        BinaryOperator::Modulus,
        BinaryOperator::RightShift,
        BinaryOperator::LeftShift,
        BinaryOperator::Or,
        BinaryOperator::And,
        BinaryOperator::Xor,
    ] {
        conditions.push(Condition::binary(op, "[x]", "2"));
    }
    for op in [LogicalOperator::And, LogicalOperator::Or] {
        conditions.push(Condition::logical(op, "[a]", "[b]"));
    }
    for op in [
        ComparatorOperator::GreaterThan,
        ComparatorOperator::LessThan,
        ComparatorOperator::GreaterThanOrEqual,
        ComparatorOperator::LessThanOrEqual,
        ComparatorOperator::Equal,
        ComparatorOperator::NotEqual,
        ComparatorOperator::RegexMatch,
        ComparatorOperator::RegexNoMatch,
    ] {
        conditions.push(Condition::comparator(op, "[x]", "y"));
    }
    for op in [ExistsOperator::Exists, ExistsOperator::NotExists] {
        conditions.push(Condition::exists(op, "key"));
    }
    for c in conditions {
        let wire = ConditionCodec::encode(Some(&c));
        assert_eq!(ConditionCodec::decode(Some(&wire)), Some(c.clone()), "failed for {c}");
    }
}

#[test]
fn test_absent_condition_stays_absent() {
    // A decoded empty condition must not fabricate a Some value
    let wire = json!({"continuation": {"name": "gate", "condition": {}}});
    match ProcessCodec::decode(&wire).unwrap() {
        Process::Continuation(c) => assert!(c.condition.is_none()),
        other => panic!("expected continuation, got {other:?}"),
    }

    let with = json!({"continuation": {"name": "gate", "condition":
        {"exists": {"ops": [{"key": "k", "op": "Exists"}]}}}});
    match ProcessCodec::decode(&with).unwrap() {
        Process::Continuation(c) => assert!(c.condition.is_some()),
        other => panic!("expected continuation, got {other:?}"),
    }
}

// =============================================================================
// Process Codec Tests
// =============================================================================

fn all_variants() -> Vec<Process> {
    let cond = Condition::comparator(ComparatorOperator::GreaterThan, "[amount]", "1000");
    let mut completer = Completer::new("join_orders", "kv");
    completer.join_keys = vec!["order_id".to_string(), "user_id".to_string()];
    completer.timeout_ms = 30_000;
    let mut spawner = Spawner::new("page_oncall", "/usr/local/bin/page.sh");
    spawner.delay_in_ms = 500;
    spawner.do_sync = true;
    spawner.command_args = vec!["--severity".to_string(), "high".to_string()];
    let mut entwine = Entwine::new("anchor", "kv", "blobs");
    entwine.pem_path = "/etc/keys/sign.pem".to_string();
    entwine.sub_stream_id = "orders".to_string();
    entwine.ticker_endpoint = "ticker:9000".to_string();
    entwine.ticker_interval = 100;
    vec![
        Process::Aggregator(
            Aggregator::new("sum_amount", "kv", "amount", AggregationType::Sum)
                .with_group_by_keys(vec!["region".to_string()]),
        ),
        Process::Annotator(
            Annotator::new("tag_env").add_annotation(Annotation::new("env", "prod")),
        ),
        Process::Completer(completer),
        Process::Filter(Filter::new("keep_errors", "ERROR", true)),
        Process::Spawner(spawner),
        Process::Tee(
            Tee::new("mirror", "sink")
                .with_transformer_ref("normalize")
                .with_additional_body(json!({"origin": "edge"})),
        ),
        Process::Transformer(
            Transformer::new("normalize")
                .add_transformation(Transformation::new(
                    "amount",
                    "cents",
                    TransformationKind::MapMult {
                        value: "100".to_string(),
                    },
                ))
                .with_forward_input_fields(true),
        ),
        Process::Continuation(Continuation::new("gate")),
        Process::Entwine(entwine.with_condition(cond)),
    ]
}

#[test]
fn test_every_variant_round_trips() {
    for p in all_variants() {
        let wire = ProcessCodec::encode(&p);
        assert_eq!(ProcessCodec::decode(&wire).unwrap(), p, "variant {:?}", p.kind());
    }
}

#[test]
fn test_every_variant_round_trips_with_condition() {
    let cond = Condition::exists(ExistsOperator::NotExists, "trace.id");
    let processes = vec![
        Process::Spawner(Spawner::new("s", "/bin/true").with_condition(cond.clone())),
        Process::Aggregator(
            Aggregator::new("a", "kv", "k", AggregationType::Max).with_condition(cond.clone()),
        ),
        Process::Completer(Completer::new("c", "kv").with_condition(cond.clone())),
        Process::Tee(Tee::new("t", "sink").with_condition(cond.clone())),
        Process::Continuation(Continuation::new("g").with_condition(cond.clone())),
        Process::Entwine(Entwine::new("e", "kv", "blobs").with_condition(cond)),
    ];
    for p in processes {
        let wire = ProcessCodec::encode(&p);
        assert_eq!(ProcessCodec::decode(&wire).unwrap(), p, "variant {:?}", p.kind());
    }
}

#[test]
fn test_tag_discrimination() {
    for p in all_variants() {
        let wire = ProcessCodec::encode(&p);
        let decoded = ProcessCodec::decode(&wire).unwrap();
        assert_eq!(decoded.kind(), p.kind());
        assert_eq!(wire.as_object().unwrap().len(), 1);
        assert!(wire.get(p.kind().tag()).is_some());
    }
}

#[test]
fn test_missing_tag_is_a_fatal_error() {
    let err = ProcessCodec::decode(&json!({"sprocket": {"name": "x"}})).unwrap_err();
    assert_eq!(err.to_string(), "cannot find process definition type");
}

#[test]
fn test_map_add_args_wire_shape() {
    let p = Process::Transformer(Transformer::new("bump").add_transformation(
        Transformation::new("count", "count", TransformationKind::MapAdd {
            value: "1".to_string(),
        }),
    ));
    let wire = ProcessCodec::encode(&p);
    let spec = &wire["transformer"]["specs"][0];
    assert_eq!(spec["transformation"]["transformationType"], "TransformMapAdd");
    assert_eq!(spec["transformation"]["mapAddArgs"], json!({"value": "1"}));
    assert!(spec["transformation"].get("mapArgs").is_none());
}

// =============================================================================
// Document Codec Tests
// =============================================================================

fn sample_document() -> Document {
    Document {
        partition_uuid: "9b1c-44d0".to_string(),
        externals: vec![
            External::new("kv", ExternalType::KVStore, "redis://localhost:6379"),
            External::new("sink", ExternalType::PubSub, "kafka://broker:9092/out"),
        ],
        processes: all_variants(),
        pipelines: vec![
            Pipeline::new("ingest")
                .add_step(PipelineStep::new("keep_errors").with_retries(3, 250))
                .add_step(PipelineStep::new("sum_amount"))
                .with_checkpoint("kv"),
            Pipeline::new("mirror_only").add_step(PipelineStep::new("mirror")),
        ],
    }
}

#[test]
fn test_full_document_round_trip() {
    let doc = sample_document();
    let text = DocumentCodec::serialize(&doc).unwrap();
    assert_eq!(DocumentCodec::parse(&text).unwrap(), doc);
}

#[test]
fn test_document_preserves_collection_order() {
    let doc = sample_document();
    let text = DocumentCodec::serialize(&doc).unwrap();
    let reparsed = DocumentCodec::parse(&text).unwrap();
    let names: Vec<&str> = reparsed.processes.iter().map(|p| p.name()).collect();
    let expected: Vec<&str> = doc.processes.iter().map(|p| p.name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_parse_hand_written_document() {
    let text = r#"{
      "partitionUuid": "p-7",
      "externalSystems": [
        {"name": "files", "externalType": "ExternalLocalFile", "connectionString": "/var/data"}
      ],
      "processDefinitions": [
        {"filter": {"name": "f1", "regex": "WARN|ERROR", "keepMatched": true}}
      ],
      "pipelines": [
        {"name": "main", "processes": [{"name": "f1"}], "enableTracing": true}
      ]
    }"#;
    let doc = DocumentCodec::parse(text).unwrap();
    assert_eq!(doc.partition_uuid, "p-7");
    assert_eq!(doc.externals[0].external_type, ExternalType::LocalFile);
    assert_eq!(doc.processes[0].name(), "f1");
    assert!(doc.pipelines[0].enable_tracing);
    assert!(!doc.pipelines[0].enable_metrics);
}

#[test]
fn test_one_bad_entity_fails_the_whole_parse() {
    let text = r#"{
      "processDefinitions": [
        {"filter": {"name": "good", "regex": "x", "keepMatched": true}},
        {"name": "untagged"}
      ]
    }"#;
    assert!(DocumentCodec::parse(text).is_err());
}
