use std::num::NonZeroUsize;

use crate::expression::{NameExpr, ValueExpr};

/// Descriptor for one projected property: a name computation, a value
/// computation and three independent modifiers.
///
/// Descriptors are built per request and consumed by
/// [`crate::projection::ProjectionCompiler`]; they are hashable so identical
/// descriptor lists can share a compiled plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedProperty {
    pub name: NameExpr,
    pub value: ValueExpr,
    /// Visibility tag only: the slot is always populated, the materializer
    /// decides whether to expose it.
    pub auto_selected: bool,
    /// When it evaluates to `true` the slot is forced to null.
    pub null_check: Option<ValueExpr>,
    /// Caps a sequence-valued property to this many elements.
    pub page_size: Option<NonZeroUsize>,
}

impl NamedProperty {
    pub fn new(name: impl Into<NameExpr>, value: ValueExpr) -> Self {
        Self {
            name: name.into(),
            value,
            auto_selected: false,
            null_check: None,
            page_size: None,
        }
    }

    /// Mark the property as auto-selected.
    pub fn auto_selected(self) -> Self {
        self.with_auto_selected(true)
    }

    pub fn with_auto_selected(mut self, auto_selected: bool) -> Self {
        self.auto_selected = auto_selected;
        self
    }

    pub fn with_null_check(mut self, null_check: ValueExpr) -> Self {
        self.null_check = Some(null_check);
        self
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Human readable identification used in error messages.
    pub fn label(&self) -> String {
        match &self.name {
            NameExpr::Literal(Some(name)) => name.clone(),
            _ => self.value.to_string(),
        }
    }
}
