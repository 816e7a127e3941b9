use serde_json::{Map, Value};

use crate::{expression::ValueKind, projection::ProjectionError};

/// One input row: a JSON object whose members are entity properties and
/// navigations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(pub Map<String, Value>);

impl Row {
    pub fn new() -> Self { Self(Map::new()) }
    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }
    pub fn as_map(&self) -> &Map<String, Value> { &self.0 }
    pub fn into_value(self) -> Value { Value::Object(self.0) }
}

impl From<Map<String, Value>> for Row {
    fn from(value: Map<String, Value>) -> Self {
        Row(value)
    }
}

impl TryFrom<Value> for Row {
    type Error = ProjectionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Row(map)),
            other => Err(ProjectionError::Other(format!("row must be an object, got {}", ValueKind::of_value(&other)))),
        }
    }
}
