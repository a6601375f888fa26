//! Condition wire codec
//!
//! Expression conditions encode under an `expression` wrapper keyed by
//! operator family; existence tests encode under `exists` with a
//! single-element `ops` array. Operands encode as a variable/numeric/literal
//! spec chosen by classifying the operand string. Decoding never fails: any
//! absent, null or unrecognized shape is "no condition".

use crate::json::JsonObject;
use pipewright_core::condition::operator::{
    BinaryOperator, ComparatorOperator, ExistsOperator, LogicalOperator, UnaryOperator,
};
use pipewright_core::condition::{classify_operand, variable_name, Condition, OperandKind};
use serde_json::{json, Value};

/// Condition wire codec
pub struct ConditionCodec;

impl ConditionCodec {
    /// Encode an optional condition. `None` encodes as the empty object,
    /// matching the document format's "condition always present, possibly
    /// empty" convention.
    pub fn encode(condition: Option<&Condition>) -> Value {
        let condition = match condition {
            Some(c) => c,
            None => return json!({}),
        };
        match condition {
            Condition::Comparator { op, lhs, rhs } => json!({
                "expression": {
                    "comparator": {
                        "lhs": Self::encode_operand(lhs),
                        "rhs": Self::encode_operand(rhs),
                        "op": op.as_str(),
                    }
                }
            }),
            Condition::Logical { op, lhs, rhs } => json!({
                "expression": {
                    "logical": {
                        "lhs": Self::encode_operand(lhs),
                        "rhs": Self::encode_operand(rhs),
                        "op": op.as_str(),
                    }
                }
            }),
            Condition::Binary { op, lhs, rhs } => json!({
                "expression": {
                    "binary": {
                        "lhs": Self::encode_operand(lhs),
                        "rhs": Self::encode_operand(rhs),
                        "op": op.as_str(),
                    }
                }
            }),
            Condition::Unary { op, rhs } => json!({
                "expression": {
                    "unary": {
                        "rhs": Self::encode_operand(rhs),
                        "op": op.as_str(),
                    }
                }
            }),
            Condition::Exists { op, key } => json!({
                "exists": {
                    "ops": [
                        {
                            "key": key,
                            "op": op.as_str(),
                        }
                    ]
                }
            }),
        }
    }

    /// Decode an optional condition, falling back soft to `None`
    pub fn decode(value: Option<&Value>) -> Option<Condition> {
        let value = value?;
        let decoded = Self::decode_inner(value);
        if decoded.is_none() && value.is_object() && !value.as_object().is_some_and(|o| o.is_empty())
        {
            log::debug!("unrecognized condition shape, treating as no condition");
        }
        decoded
    }

    fn decode_inner(value: &Value) -> Option<Condition> {
        if let Some(expression) = value.get("expression") {
            if let Some(body) = expression.get("comparator") {
                let op = ComparatorOperator::parse(&JsonObject::get_string_or_default(body, "op"))?;
                return Some(Condition::Comparator {
                    op,
                    lhs: Self::decode_operand(body.get("lhs")),
                    rhs: Self::decode_operand(body.get("rhs")),
                });
            }
            if let Some(body) = expression.get("logical") {
                let op = LogicalOperator::parse(&JsonObject::get_string_or_default(body, "op"))?;
                return Some(Condition::Logical {
                    op,
                    lhs: Self::decode_operand(body.get("lhs")),
                    rhs: Self::decode_operand(body.get("rhs")),
                });
            }
            if let Some(body) = expression.get("binary") {
                let op = BinaryOperator::parse(&JsonObject::get_string_or_default(body, "op"))?;
                return Some(Condition::Binary {
                    op,
                    lhs: Self::decode_operand(body.get("lhs")),
                    rhs: Self::decode_operand(body.get("rhs")),
                });
            }
            if let Some(body) = expression.get("unary") {
                let op = UnaryOperator::parse(&JsonObject::get_string_or_default(body, "op"))?;
                return Some(Condition::Unary {
                    op,
                    rhs: Self::decode_operand(body.get("rhs")),
                });
            }
        }
        if let Some(ops) = value.get("exists").and_then(|e| e.get("ops")) {
            let first = ops.as_array()?.first()?;
            let op = ExistsOperator::parse(&JsonObject::get_string_or_default(first, "op"))?;
            return Some(Condition::Exists {
                op,
                key: JsonObject::get_string_or_default(first, "key"),
            });
        }
        None
    }

    fn encode_operand(operand: &str) -> Value {
        match classify_operand(operand) {
            OperandKind::Variable => json!({
                "variable": {
                    "name": variable_name(operand),
                }
            }),
            OperandKind::Numeric => json!({ "numeric": operand }),
            OperandKind::Literal => json!({ "literal": operand }),
        }
    }

    fn decode_operand(spec: Option<&Value>) -> String {
        let spec = match spec {
            Some(s) => s,
            None => return String::new(),
        };
        if let Some(variable) = spec.get("variable") {
            return format!("[{}]", JsonObject::get_string_or_default(variable, "name"));
        }
        if let Some(numeric) = spec.get("numeric").and_then(|v| v.as_str()) {
            return numeric.to_string();
        }
        if let Some(literal) = spec.get("literal").and_then(|v| v.as_str()) {
            return literal.to_string();
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(c: Condition) -> Condition {
        let wire = ConditionCodec::encode(Some(&c));
        ConditionCodec::decode(Some(&wire)).expect("condition should survive the round trip")
    }

    #[test]
    fn test_comparator_round_trip_operand_classes() {
        for (lhs, rhs) in [("[x]", "42"), ("42", "foo"), ("foo", "[x]")] {
            let c = Condition::comparator(ComparatorOperator::GreaterThan, lhs, rhs);
            assert_eq!(round_trip(c.clone()), c);
        }
    }

    #[test]
    fn test_every_family_round_trips() {
        let conditions = vec![
            Condition::unary(UnaryOperator::LogicalNot, "[flag]"),
            Condition::binary(BinaryOperator::Modulus, "[n]", "2"),
            Condition::logical(LogicalOperator::And, "[a]", "[b]"),
            Condition::comparator(ComparatorOperator::RegexMatch, "[msg]", "^ERROR"),
            Condition::exists(ExistsOperator::NotExists, "trace.id"),
        ];
        for c in conditions {
            assert_eq!(round_trip(c.clone()), c);
        }
    }

    #[test]
    fn test_unary_wire_has_no_lhs() {
        let c = Condition::unary(UnaryOperator::Negation, "[x]");
        let wire = ConditionCodec::encode(Some(&c));
        assert!(wire["expression"]["unary"].get("lhs").is_none());
        assert_eq!(wire["expression"]["unary"]["op"], "Negation");
    }

    #[test]
    fn test_exists_wire_is_single_element_ops() {
        let c = Condition::exists(ExistsOperator::Exists, "user.id");
        let wire = ConditionCodec::encode(Some(&c));
        let ops = wire["exists"]["ops"].as_array().unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0]["key"], "user.id");
        assert_eq!(ops[0]["op"], "Exists");
    }

    #[test]
    fn test_variable_operand_spec() {
        let c = Condition::comparator(ComparatorOperator::Equal, "[user.name]", "bob");
        let wire = ConditionCodec::encode(Some(&c));
        let body = &wire["expression"]["comparator"];
        assert_eq!(body["lhs"]["variable"]["name"], "user.name");
        assert_eq!(body["rhs"]["literal"], "bob");
    }

    #[test]
    fn test_numeric_operand_spec_stays_a_string() {
        let c = Condition::comparator(ComparatorOperator::LessThan, "[n]", "42");
        let wire = ConditionCodec::encode(Some(&c));
        assert_eq!(wire["expression"]["comparator"]["rhs"]["numeric"], "42");
    }

    #[test]
    fn test_none_encodes_to_empty_object() {
        assert_eq!(ConditionCodec::encode(None), json!({}));
    }

    #[test]
    fn test_soft_fallbacks() {
        assert_eq!(ConditionCodec::decode(None), None);
        assert_eq!(ConditionCodec::decode(Some(&json!(null))), None);
        assert_eq!(ConditionCodec::decode(Some(&json!({}))), None);
        assert_eq!(
            ConditionCodec::decode(Some(&json!({"expression": {"ternary": {}}}))),
            None
        );
        // Recognized shape, unrecognized operator
        assert_eq!(
            ConditionCodec::decode(Some(&json!({
                "expression": {"comparator": {"lhs": {"numeric": "1"}, "rhs": {"numeric": "2"}, "op": "ApproxEqual"}}
            }))),
            None
        );
    }

    #[test]
    fn test_decode_branch_priority() {
        // comparator wins over logical when both are present
        let wire = json!({
            "expression": {
                "comparator": {"lhs": {"numeric": "1"}, "rhs": {"numeric": "2"}, "op": "Equal"},
                "logical": {"lhs": {"numeric": "1"}, "rhs": {"numeric": "2"}, "op": "And"},
            }
        });
        let c = ConditionCodec::decode(Some(&wire)).unwrap();
        assert!(matches!(c, Condition::Comparator { .. }));
    }
}
