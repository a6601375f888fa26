//! Transformation wire codec
//!
//! Each transformation entry carries a `transformation` body holding the
//! `Transform`-prefixed type name, an optional condition, and at most one
//! kind-specific argument object.

use crate::condition::ConditionCodec;
use crate::error::{CodecError, Result};
use crate::json::JsonObject;
use pipewright_core::model::{Transformation, TransformationKind};
use serde_json::{json, Value};

/// Transformation wire codec
pub struct TransformationCodec;

impl TransformationCodec {
    /// Encode a single transformation entry
    pub fn encode(transformation: &Transformation) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(
            "transformationType".to_string(),
            json!(format!("Transform{}", transformation.kind.type_name())),
        );
        body.insert(
            "condition".to_string(),
            ConditionCodec::encode(transformation.condition.as_ref()),
        );
        match &transformation.kind {
            TransformationKind::Map { path } => {
                body.insert("mapArgs".to_string(), json!({ "path": path }));
            }
            TransformationKind::MapAdd { value } => {
                body.insert("mapAddArgs".to_string(), json!({ "value": value }));
            }
            TransformationKind::MapMult { value } => {
                body.insert("mapMultArgs".to_string(), json!({ "value": value }));
            }
            TransformationKind::MapRegex { regex, replace } => {
                body.insert(
                    "mapRegexArgs".to_string(),
                    json!({ "regex": regex, "replace": replace }),
                );
            }
            TransformationKind::LeftFold { path } => {
                body.insert("leftFoldArgs".to_string(), json!({ "path": path }));
            }
            TransformationKind::RightFold { path } => {
                body.insert("rightFoldArgs".to_string(), json!({ "path": path }));
            }
            TransformationKind::Sum
            | TransformationKind::Copy
            | TransformationKind::Count
            | TransformationKind::PopHead
            | TransformationKind::PopTail => {}
        }
        json!({
            "sourceField": transformation.source_field,
            "targetField": transformation.target_field,
            "transformation": Value::Object(body),
        })
    }

    /// Decode a single transformation entry
    pub fn decode(value: &Value) -> Result<Transformation> {
        let body = JsonObject::get_object(value, "transformation")
            .ok_or_else(|| CodecError::MissingField {
                field: "transformation".to_string(),
            })?;
        let type_name = JsonObject::get_string(body, "transformationType")?;
        let kind_name = type_name.strip_prefix("Transform").unwrap_or(&type_name);
        let kind = Self::decode_kind(kind_name, body)?;
        Ok(Transformation {
            source_field: JsonObject::get_string_or_default(value, "sourceField"),
            target_field: JsonObject::get_string_or_default(value, "targetField"),
            condition: ConditionCodec::decode(body.get("condition")),
            kind,
        })
    }

    fn decode_kind(kind_name: &str, body: &Value) -> Result<TransformationKind> {
        // Args wrappers are probed in a fixed order; the first present object
        // supplies the arguments for kinds that take them.
        let args = ["mapAddArgs", "mapArgs", "mapRegexArgs", "mapMultArgs", "leftFoldArgs", "rightFoldArgs"]
            .iter()
            .find_map(|key| JsonObject::get_object(body, key));
        let arg_string = |field: &str| {
            args.map(|a| JsonObject::get_string_or_default(a, field))
                .unwrap_or_default()
        };
        match kind_name {
            "Sum" => Ok(TransformationKind::Sum),
            "Copy" => Ok(TransformationKind::Copy),
            "Count" => Ok(TransformationKind::Count),
            "PopHead" => Ok(TransformationKind::PopHead),
            "PopTail" => Ok(TransformationKind::PopTail),
            "Map" => Ok(TransformationKind::Map {
                path: arg_string("path"),
            }),
            "MapAdd" => Ok(TransformationKind::MapAdd {
                value: arg_string("value"),
            }),
            "MapMult" => Ok(TransformationKind::MapMult {
                value: arg_string("value"),
            }),
            "MapRegex" => Ok(TransformationKind::MapRegex {
                regex: arg_string("regex"),
                replace: arg_string("replace"),
            }),
            "LeftFold" => Ok(TransformationKind::LeftFold {
                path: arg_string("path"),
            }),
            "RightFold" => Ok(TransformationKind::RightFold {
                path: arg_string("path"),
            }),
            other => Err(CodecError::InvalidValue {
                field: "transformationType".to_string(),
                message: format!("unknown transformation type: {other}"),
            }),
        }
    }
}
