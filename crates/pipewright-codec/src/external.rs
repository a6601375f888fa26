//! External system wire codec

use crate::error::{CodecError, Result};
use crate::json::JsonObject;
use pipewright_core::{External, ExternalType};
use serde_json::{json, Value};

/// External wire codec
pub struct ExternalCodec;

impl ExternalCodec {
    /// Encode an external descriptor; the wire type name carries an
    /// `External` prefix.
    pub fn encode(external: &External) -> Value {
        json!({
            "name": external.name,
            "connectionString": external.connection_string,
            "externalType": format!("External{}", external.external_type.as_str()),
        })
    }

    /// Decode an external descriptor, stripping the `External` prefix from
    /// the type name. An unrecognized type name fails the decode.
    pub fn decode(value: &Value) -> Result<External> {
        let type_str = JsonObject::get_string(value, "externalType")?;
        let type_name = type_str.strip_prefix("External").unwrap_or(&type_str);
        let external_type = ExternalType::parse(type_name)
            .map_err(|_| CodecError::UnknownExternalType(type_str.clone()))?;
        Ok(External {
            name: JsonObject::get_string(value, "name")?,
            external_type,
            connection_string: JsonObject::get_string_or_default(value, "connectionString"),
        })
    }
}
