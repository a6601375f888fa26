//! External system descriptors
//!
//! An external is a named reference to an out-of-process system that
//! processes read from or write to. Processes and pipelines refer to
//! externals by name.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// The kind of system an external points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalType {
    KVStore,
    ObjectStore,
    PubSub,
    Http,
    LocalFile,
}

impl ExternalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalType::KVStore => "KVStore",
            ExternalType::ObjectStore => "ObjectStore",
            ExternalType::PubSub => "PubSub",
            ExternalType::Http => "Http",
            ExternalType::LocalFile => "LocalFile",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "KVStore" => Ok(ExternalType::KVStore),
            "ObjectStore" => Ok(ExternalType::ObjectStore),
            "PubSub" => Ok(ExternalType::PubSub),
            "Http" => Ok(ExternalType::Http),
            "LocalFile" => Ok(ExternalType::LocalFile),
            other => Err(CoreError::UnknownTypeName(other.to_string())),
        }
    }
}

/// A named external system connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct External {
    /// Unique key within the externals collection
    pub name: String,
    pub external_type: ExternalType,
    /// Provider-specific connection string
    pub connection_string: String,
}

impl External {
    pub fn new(
        name: impl Into<String>,
        external_type: ExternalType,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            external_type,
            connection_string: connection_string.into(),
        }
    }
}

impl std::fmt::Display for External {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.name,
            self.external_type.as_str(),
            self.connection_string
        )
    }
}
