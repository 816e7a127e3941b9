use std::fmt;

use crate::expression::PropertyPath;

/// Computation producing the (nullable) name of a projected property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameExpr {
    /// Known at compile time. `Literal(None)` is the null literal: such
    /// properties are dropped before shape selection.
    Literal(Option<String>),
    /// Read from the row at evaluation time. Anything but a string counts as null.
    Property(PropertyPath),
}

impl NameExpr {
    pub fn null() -> Self {
        NameExpr::Literal(None)
    }

    pub fn property(path: &str) -> Self {
        NameExpr::Property(PropertyPath::from(path))
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, NameExpr::Literal(None))
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            NameExpr::Literal(Some(name)) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for NameExpr {
    fn from(value: &str) -> Self {
        NameExpr::Literal(Some(value.to_string()))
    }
}

impl From<String> for NameExpr {
    fn from(value: String) -> Self {
        NameExpr::Literal(Some(value))
    }
}

impl From<Option<&str>> for NameExpr {
    fn from(value: Option<&str>) -> Self {
        NameExpr::Literal(value.map(str::to_string))
    }
}

impl fmt::Display for NameExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameExpr::Literal(Some(name)) => write!(f, "{}", name),
            NameExpr::Literal(None) => write!(f, "<null>"),
            NameExpr::Property(path) => write!(f, "${}", path),
        }
    }
}
