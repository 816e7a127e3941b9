use std::fmt;

use serde_json::{Map, Value};

/// Navigation path through a row, e.g. `Customer/Address/City`.
///
/// `/` separates segments. A path without any `/` may use `.` instead, so a
/// key that itself contains a `.` is reached by writing the path with `/`
/// (`Meta/a.b`, or `a.b/` for a top-level key). Empty segments are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, which is the natural property name for the path.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Walk the path. Returns `None` when a segment is missing or an
    /// intermediate value is not an object (null included).
    pub fn resolve<'a>(&self, row: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = row.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl From<&str> for PropertyPath {
    fn from(value: &str) -> Self {
        let separator = if value.contains('/') { '/' } else { '.' };
        let segments = value
            .split(separator)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
