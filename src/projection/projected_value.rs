use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::projection::{PropertyContainer, TruncatedCollection};

/// Realized value of one container slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectedValue {
    Value(Value),
    /// Paged sequence.
    Truncated(TruncatedCollection<ProjectedValue>),
    /// Expanded single navigation.
    Container(PropertyContainer),
    /// Expanded collection navigation, or a materialized sequence.
    Collection(Vec<ProjectedValue>),
}

impl ProjectedValue {
    pub fn null() -> Self {
        ProjectedValue::Value(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ProjectedValue::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ProjectedValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_truncated(&self) -> Option<&TruncatedCollection<ProjectedValue>> {
        match self {
            ProjectedValue::Truncated(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&PropertyContainer> {
        match self {
            ProjectedValue::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&[ProjectedValue]> {
        match self {
            ProjectedValue::Collection(items) => Some(items),
            _ => None,
        }
    }

    /// Plain JSON. Nested containers are materialized with the same
    /// auto-selected policy.
    pub fn to_json(&self, include_auto_selected: bool) -> Value {
        match self {
            ProjectedValue::Value(v) => v.clone(),
            ProjectedValue::Truncated(t) => Value::Array(t.iter().map(|v| v.to_json(include_auto_selected)).collect()),
            ProjectedValue::Container(c) => c.to_json(include_auto_selected),
            ProjectedValue::Collection(items) => Value::Array(items.iter().map(|v| v.to_json(include_auto_selected)).collect()),
        }
    }
}

impl From<Value> for ProjectedValue {
    fn from(value: Value) -> Self {
        ProjectedValue::Value(value)
    }
}

impl PartialEq<Value> for ProjectedValue {
    fn eq(&self, other: &Value) -> bool {
        matches!(self, ProjectedValue::Value(v) if v == other)
    }
}

impl Serialize for ProjectedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProjectedValue::Value(v) => v.serialize(serializer),
            ProjectedValue::Truncated(t) => t.serialize(serializer),
            ProjectedValue::Container(c) => c.serialize(serializer),
            ProjectedValue::Collection(items) => items.serialize(serializer),
        }
    }
}
