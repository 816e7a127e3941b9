use std::{borrow::Cow, num::NonZeroUsize};

use serde_json::{Map, Value};

use crate::{
    expression::{Literal, NameExpr, ValueExpr, ValueKind},
    projection::{ProjectedValue, ProjectionError, ProjectionPlan, SlotRule, TruncatedCollection},
};

type Elements<'a> = Box<dyn Iterator<Item = Cow<'a, Value>> + 'a>;

/// Row-level interpreter for compiled projection expressions.
pub struct Eval;

impl Eval {
    pub fn eval_name(name: &NameExpr, row: &Map<String, Value>) -> Option<String> {
        match name {
            NameExpr::Literal(name) => name.clone(),
            NameExpr::Property(path) => path.resolve(row).and_then(Value::as_str).map(str::to_string),
        }
    }

    pub fn eval_slot(rule: &SlotRule, row: &Map<String, Value>, label: &str) -> Result<ProjectedValue, ProjectionError> {
        match rule {
            SlotRule::Direct(expr) => Self::eval_value(expr, row, label),
            SlotRule::Truncate { source, page_size } => Self::eval_truncated(source, *page_size, row, label),
            SlotRule::Guarded { check, inner } => {
                if Self::eval_guard(check, row, label)? {
                    Ok(ProjectedValue::null())
                } else {
                    Self::eval_slot(inner, row, label)
                }
            }
        }
    }

    pub fn eval_value(expr: &ValueExpr, row: &Map<String, Value>, label: &str) -> Result<ProjectedValue, ProjectionError> {
        match expr {
            ValueExpr::Literal(l) => Ok(ProjectedValue::Value(l.to_json())),
            ValueExpr::Property(path) => Ok(ProjectedValue::Value(path.resolve(row).cloned().unwrap_or(Value::Null))),
            ValueExpr::IsNull(inner) => Ok(ProjectedValue::Value(Value::Bool(Self::eval_is_null(inner, row, label)?))),
            ValueExpr::Range { start, end } => {
                Ok(ProjectedValue::Value(Value::Array((*start..*end).map(Value::from).collect())))
            }
            ValueExpr::Expand { path, plan } => match path.resolve(row) {
                None | Some(Value::Null) => Ok(ProjectedValue::null()),
                Some(Value::Array(items)) => {
                    let expanded = items.iter()
                        .map(|item| Self::expand_element(plan, item, label))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(ProjectedValue::Collection(expanded))
                }
                Some(other) => Self::expand_element(plan, other, label),
            },
        }
    }

    /// `true` forces the slot to null; `false` and null leave it alone.
    pub fn eval_guard(check: &ValueExpr, row: &Map<String, Value>, label: &str) -> Result<bool, ProjectionError> {
        if let ValueExpr::Range { .. } = check {
            return Err(ProjectionError::InvalidNullCheck { property: label.to_string(), found: ValueKind::Array });
        }
        match Self::eval_value(check, row, label)? {
            ProjectedValue::Value(Value::Bool(b)) => Ok(b),
            ProjectedValue::Value(Value::Null) => Ok(false),
            other => Err(ProjectionError::InvalidNullCheck { property: label.to_string(), found: Self::kind_of(&other) }),
        }
    }

    // Sequences are never null, so ranges and array literals are not built
    // and expansions only look at their navigation target.
    fn eval_is_null(expr: &ValueExpr, row: &Map<String, Value>, label: &str) -> Result<bool, ProjectionError> {
        match expr {
            ValueExpr::Literal(l) => Ok(l.is_null()),
            ValueExpr::Property(path) => Ok(matches!(path.resolve(row), None | Some(Value::Null))),
            ValueExpr::IsNull(_) | ValueExpr::Range { .. } => Ok(false),
            ValueExpr::Expand { path, plan } => match path.resolve(row) {
                None | Some(Value::Null) => Ok(true),
                Some(Value::Object(_) | Value::Array(_)) => Ok(false),
                Some(other) => Self::expand_element(plan, other, label).map(|v| v.is_null()),
            },
        }
    }

    fn eval_truncated(source: &ValueExpr, page_size: NonZeroUsize, row: &Map<String, Value>, label: &str) -> Result<ProjectedValue, ProjectionError> {
        let elements = Self::eval_sequence(source, row, label)?;
        let page = TruncatedCollection::new(elements, page_size);
        let page = match source {
            ValueExpr::Expand { plan, .. } => page.try_map(|item| Self::expand_element(plan, &item, label))?,
            _ => page.map(|item| ProjectedValue::Value(item.into_owned())),
        };
        Ok(ProjectedValue::Truncated(page))
    }

    // Lazy element stream; only what the page pulls gets cloned.
    fn eval_sequence<'a>(expr: &'a ValueExpr, row: &'a Map<String, Value>, label: &str) -> Result<Elements<'a>, ProjectionError> {
        match expr {
            ValueExpr::Literal(Literal::Array(items)) => Ok(Box::new(items.iter().map(|l| Cow::Owned(l.to_json())))),
            ValueExpr::Range { start, end } => Ok(Box::new((*start..*end).map(|i| Cow::Owned(Value::from(i))))),
            ValueExpr::Property(path) | ValueExpr::Expand { path, .. } => match path.resolve(row) {
                Some(Value::Array(items)) => Ok(Box::new(items.iter().map(Cow::Borrowed))),
                other => Err(ProjectionError::InvalidShape {
                    property: label.to_string(),
                    found: other.map(ValueKind::of_value).unwrap_or(ValueKind::Null),
                }),
            },
            ValueExpr::Literal(l) => Err(ProjectionError::InvalidShape { property: label.to_string(), found: ValueKind::of_value(&l.to_json()) }),
            ValueExpr::IsNull(_) => Err(ProjectionError::InvalidShape { property: label.to_string(), found: ValueKind::Bool }),
        }
    }

    fn expand_element(plan: &ProjectionPlan, value: &Value, label: &str) -> Result<ProjectedValue, ProjectionError> {
        match value {
            Value::Object(map) => Ok(ProjectedValue::Container(plan.evaluate_map(map)?)),
            Value::Null => Ok(ProjectedValue::null()),
            other => Err(ProjectionError::Other(format!(
                "cannot expand property '{}': expected object, got {}",
                label,
                ValueKind::of_value(other)
            ))),
        }
    }

    fn kind_of(value: &ProjectedValue) -> ValueKind {
        match value {
            ProjectedValue::Value(v) => ValueKind::of_value(v),
            ProjectedValue::Container(_) => ValueKind::Object,
            ProjectedValue::Truncated(_) | ProjectedValue::Collection(_) => ValueKind::Array,
        }
    }
}
