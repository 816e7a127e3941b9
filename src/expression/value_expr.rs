use std::{fmt, sync::Arc};

use crate::{expression::{Literal, PropertyPath}, projection::ProjectionPlan};

/// Value-producing computation, interpreted once per row.
///
/// Building a `ValueExpr` never touches row data; evaluation happens later in
/// [`crate::executor::Eval`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ValueExpr {
    Literal(Literal),
    /// Navigation through the row; missing or null intermediates yield null.
    Property(PropertyPath),
    /// `true` when the inner expression evaluates to null.
    IsNull(Box<ValueExpr>),
    /// Lazy half-open integer sequence `start..end`.
    Range { start: i64, end: i64 },
    /// Nested projection applied to the navigated object, or to every element
    /// when the navigation yields an array.
    Expand { path: PropertyPath, plan: Arc<ProjectionPlan> },
}

impl ValueExpr {
    pub fn literal(value: impl Into<Literal>) -> Self {
        ValueExpr::Literal(value.into())
    }

    pub fn null() -> Self {
        ValueExpr::Literal(Literal::Null)
    }

    pub fn property(path: &str) -> Self {
        ValueExpr::Property(PropertyPath::from(path))
    }

    pub fn is_null(expr: ValueExpr) -> Self {
        ValueExpr::IsNull(Box::new(expr))
    }

    pub fn range(start: i64, end: i64) -> Self {
        ValueExpr::Range { start, end }
    }

    pub fn expand(path: &str, plan: impl Into<Arc<ProjectionPlan>>) -> Self {
        ValueExpr::Expand { path: PropertyPath::from(path), plan: plan.into() }
    }

    /// True when the expression can never yield a sequence, whatever the row.
    pub fn is_never_sequence(&self) -> bool {
        match self {
            ValueExpr::Literal(l) => !l.is_array(),
            ValueExpr::IsNull(_) => true,
            ValueExpr::Property(_) | ValueExpr::Range { .. } | ValueExpr::Expand { .. } => false,
        }
    }
}

impl From<Literal> for ValueExpr {
    fn from(value: Literal) -> Self {
        ValueExpr::Literal(value)
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(l) => write!(f, "{}", l),
            ValueExpr::Property(p) => write!(f, "${}", p),
            ValueExpr::IsNull(e) => write!(f, "({} eq null)", e),
            ValueExpr::Range { start, end } => write!(f, "range({}, {})", start, end),
            ValueExpr::Expand { path, plan } => write!(f, "expand(${}, {} properties)", path, plan.len()),
        }
    }
}

impl fmt::Debug for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(_) => write!(f, "Literal({})", self),
            ValueExpr::Property(_) => write!(f, "Property({})", self),
            ValueExpr::IsNull(_) => write!(f, "IsNull{}", self),
            ValueExpr::Range { .. } => write!(f, "Range({})", self),
            ValueExpr::Expand { .. } => write!(f, "Expand({})", self),
        }
    }
}
