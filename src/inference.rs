//! Per-value classification.
//!
//! One sample, no joins: a value is either a scalar with a fixed kind or a
//! composite the tree builder has to descend into. Arrays are typed from their
//! first element only; an empty array carries no evidence and yields an
//! `Unknown` element.

use serde_json::{Map, Value};

use crate::options::NumberPolicy;

/// Leaf-level inferred type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// Native floating point.
    Float,
    /// Exact number, kept as `serde_json::Number`.
    PreservedNumber,
    Text,
    /// Null, or nothing to infer from.
    Unknown,
}

impl ScalarKind {
    /// Rust spelling of the kind.
    pub fn rust_type(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "f64",
            Self::PreservedNumber => "Number",
            Self::Text => "String",
            Self::Unknown => "serde_json::Value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Class<'a> {
    Scalar(ScalarKind),
    /// Needs a child type.
    Object(&'a Map<String, Value>),
    /// Non-empty array; the element type comes from `first`.
    Array { first: &'a Value },
    /// `[]`: element type is [`ScalarKind::Unknown`].
    EmptyArray,
}

pub fn classify(value: &Value, numbers: NumberPolicy) -> Class<'_> {
    match value {
        Value::Bool(_) => Class::Scalar(ScalarKind::Bool),
        Value::Number(_) => Class::Scalar(match numbers {
            NumberPolicy::Float => ScalarKind::Float,
            NumberPolicy::Preserve => ScalarKind::PreservedNumber,
        }),
        Value::String(_) => Class::Scalar(ScalarKind::Text),
        Value::Object(map) => Class::Object(map),
        Value::Array(xs) => match xs.first() {
            Some(first) => Class::Array { first },
            None => Class::EmptyArray,
        },
        Value::Null => Class::Scalar(ScalarKind::Unknown),
    }
}
