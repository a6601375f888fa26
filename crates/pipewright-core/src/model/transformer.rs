//! Transformer process definitions
//!
//! A transformer rewrites fields of in-flight events. Each transformation
//! maps a source field to a target field through a typed transformation kind;
//! kinds that take arguments carry them in their own variant, so there is no
//! loosely-keyed argument map to mistype.

use crate::condition::Condition;
use serde::{Deserialize, Serialize};

/// A field transformation applied by a transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformationKind {
    /// Sum the elements of the source field
    Sum,
    /// Copy verbatim. With empty source and target fields, copies every field.
    Copy,
    /// Count the elements of the source field
    Count,
    /// Take the first element
    PopHead,
    /// Take the last element
    PopTail,
    /// Apply the map function at `path` to each element
    Map { path: String },
    /// Add a constant to the source value
    MapAdd { value: String },
    /// Multiply the source value by a constant
    MapMult { value: String },
    /// Regex find/replace on the source value
    MapRegex { regex: String, replace: String },
    /// Fold elements left-to-right through the function at `path`
    LeftFold { path: String },
    /// Fold elements right-to-left through the function at `path`
    RightFold { path: String },
}

impl TransformationKind {
    /// The wire name without the `Transform` prefix
    pub fn type_name(&self) -> &'static str {
        match self {
            TransformationKind::Sum => "Sum",
            TransformationKind::Copy => "Copy",
            TransformationKind::Count => "Count",
            TransformationKind::PopHead => "PopHead",
            TransformationKind::PopTail => "PopTail",
            TransformationKind::Map { .. } => "Map",
            TransformationKind::MapAdd { .. } => "MapAdd",
            TransformationKind::MapMult { .. } => "MapMult",
            TransformationKind::MapRegex { .. } => "MapRegex",
            TransformationKind::LeftFold { .. } => "LeftFold",
            TransformationKind::RightFold { .. } => "RightFold",
        }
    }
}

/// One source-to-target field rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub source_field: String,
    pub target_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub kind: TransformationKind,
}

impl Transformation {
    pub fn new(
        source_field: impl Into<String>,
        target_field: impl Into<String>,
        kind: TransformationKind,
    ) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            condition: None,
            kind,
        }
    }

    /// Attach a gating condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// A copy transformation with empty fields applies to every field
    pub fn applies_to_all_fields(&self) -> bool {
        matches!(self.kind, TransformationKind::Copy)
            && self.source_field.is_empty()
            && self.target_field.is_empty()
    }
}

/// A named transformer process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub name: String,
    pub transformations: Vec<Transformation>,
    /// Forward untransformed input fields alongside the outputs
    pub forward_input_fields: bool,
}

impl Transformer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transformations: Vec::new(),
            forward_input_fields: false,
        }
    }

    pub fn add_transformation(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }

    pub fn with_forward_input_fields(mut self, forward: bool) -> Self {
        self.forward_input_fields = forward;
        self
    }
}
