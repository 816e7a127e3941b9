use std::num::NonZeroUsize;

use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    executor::{Eval, Row},
    expression::{NameExpr, ValueExpr},
    projection::{ContainerShape, PropertyContainer, PropertyEntry, ProjectionError},
};

/// How a slot's value is produced, composed at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotRule {
    Direct(ValueExpr),
    Truncate { source: ValueExpr, page_size: NonZeroUsize },
    /// `check ? null : inner`
    Guarded { check: ValueExpr, inner: Box<SlotRule> },
}

/// One compiled slot assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotPlan {
    pub name: NameExpr,
    pub rule: SlotRule,
    pub auto_selected: bool,
    /// Used in error messages.
    pub label: String,
}

/// Construction computation produced by
/// [`crate::projection::ProjectionCompiler`]: one level per container shape,
/// chained through overflow levels. Immutable and shareable across threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionPlan {
    shape: ContainerShape,
    slots: Vec<SlotPlan>,
    next: Option<Box<ProjectionPlan>>,
}

impl ProjectionPlan {
    pub(crate) fn new(shape: ContainerShape, slots: Vec<SlotPlan>, next: Option<ProjectionPlan>) -> Self {
        debug_assert!(
            shape.check(slots.len(), next.is_some()).is_ok(),
            "plan level does not match shape {shape}"
        );
        Self { shape, slots, next: next.map(Box::new) }
    }

    pub fn empty() -> Self {
        Self { shape: ContainerShape::Empty, slots: Vec::new(), next: None }
    }

    pub fn shape(&self) -> ContainerShape {
        self.shape
    }

    /// Slots of this level only.
    pub fn slots(&self) -> &[SlotPlan] {
        &self.slots
    }

    pub fn next(&self) -> Option<&ProjectionPlan> {
        self.next.as_deref()
    }

    fn levels(&self) -> impl Iterator<Item = &ProjectionPlan> {
        std::iter::successors(Some(self), |plan| plan.next())
    }

    /// Slots across the whole chain.
    pub fn len(&self) -> usize {
        self.levels().map(|level| level.slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compile-time names in declaration order; runtime names show as `None`.
    pub fn property_names(&self) -> Vec<Option<&str>> {
        self.levels()
            .flat_map(|level| level.slots.iter().map(|slot| slot.name.as_literal()))
            .collect()
    }

    /// Build the container for one row. Each computation runs at most once.
    pub fn evaluate(&self, row: &Row) -> Result<PropertyContainer, ProjectionError> {
        self.evaluate_map(row.as_map())
    }

    /// Evaluate every row, stopping at the first failure.
    pub fn evaluate_all<'a, I>(&self, rows: I) -> Result<Vec<PropertyContainer>, ProjectionError>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        rows.into_iter().map(|row| self.evaluate(row)).collect()
    }

    pub(crate) fn evaluate_map(&self, row: &Map<String, Value>) -> Result<PropertyContainer, ProjectionError> {
        trace!(shape = %self.shape, slots = self.len(), "evaluating projection");

        let mut levels = Vec::new();
        for level in self.levels() {
            let mut entries = Vec::with_capacity(level.shape.capacity());
            for slot in &level.slots {
                let name = Eval::eval_name(&slot.name, row);
                let value = Eval::eval_slot(&slot.rule, row, &slot.label)?;
                entries.push(PropertyEntry::new(name, value, slot.auto_selected));
            }
            levels.push((level.shape, entries));
        }

        let mut container: Option<PropertyContainer> = None;
        while let Some((shape, entries)) = levels.pop() {
            container = Some(PropertyContainer::assemble(shape, entries, container));
        }
        Ok(container.unwrap_or_default())
    }
}

impl Default for ProjectionPlan {
    fn default() -> Self {
        Self::empty()
    }
}
