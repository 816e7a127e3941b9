use serde_json::Value;

use crate::routing::RouteData;

/// Well-known key under which a union route stores the data of its sub-routes.
pub const SUB_ROUTE_DATA_KEY: &str = "MS_SubRoutes";

#[derive(Debug, Clone)]
pub enum RouteValue {
    /// Optional parameter that received no value.
    Optional,
    Value(Value),
    SubRoutes(Vec<RouteData>),
}

impl RouteValue {
    pub fn is_optional(&self) -> bool {
        matches!(self, RouteValue::Optional)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            RouteValue::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for RouteValue {
    fn from(value: Value) -> Self {
        RouteValue::Value(value)
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::Value(Value::String(value.to_string()))
    }
}
