//! JSON field-access helpers
//!
//! Thin accessors over `serde_json::Value` used by every codec. Required
//! accessors fail with `MissingField`; optional accessors fall back to the
//! zero value, which is how the wire format treats every absent scalar.

use crate::error::{CodecError, Result};
use serde_json::Value;

/// JSON accessor utilities
pub struct JsonObject;

impl JsonObject {
    /// Get a required string field
    pub fn get_string(obj: &Value, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| CodecError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional string field, defaulting to empty
    pub fn get_string_or_default(obj: &Value, field: &str) -> String {
        obj.get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Get an optional boolean field, defaulting to false
    pub fn get_bool_or_default(obj: &Value, field: &str) -> bool {
        obj.get(field).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Get an optional unsigned integer field, defaulting to zero
    pub fn get_u64_or_default(obj: &Value, field: &str) -> u64 {
        obj.get(field).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    /// Get an optional array field, defaulting to empty
    pub fn get_array_or_default<'a>(obj: &'a Value, field: &str) -> &'a [Value] {
        obj.get(field)
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get an optional array of strings, defaulting to empty and skipping
    /// non-string elements
    pub fn get_string_array_or_default(obj: &Value, field: &str) -> Vec<String> {
        Self::get_array_or_default(obj, field)
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get a nested object field, ignoring null
    pub fn get_object<'a>(obj: &'a Value, field: &str) -> Option<&'a Value> {
        obj.get(field).filter(|v| v.is_object())
    }
}
