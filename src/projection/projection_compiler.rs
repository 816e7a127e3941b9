use std::sync::Arc;

use tracing::debug;

use crate::{
    expression::{NamedProperty, ValueExpr, ValueKind},
    projection::{ContainerShape, ProjectionCache, ProjectionConfig, ProjectionError, ProjectionPlan, SlotPlan, SlotRule},
};

/// Turns descriptor lists into [`ProjectionPlan`]s.
///
/// Compilation only composes the supplied computations; no name, value or
/// null-check computation is evaluated here.
pub struct ProjectionCompiler;

impl ProjectionCompiler {
    pub fn compile(properties: &[NamedProperty]) -> Result<ProjectionPlan, ProjectionError> {
        Self::compile_with_config(properties, &ProjectionConfig::default())
    }

    pub fn compile_with_config(properties: &[NamedProperty], config: &ProjectionConfig) -> Result<ProjectionPlan, ProjectionError> {
        let mut slots = Vec::with_capacity(properties.len());
        let mut dropped = 0usize;
        for property in properties {
            if property.name.is_null_literal() {
                dropped += 1;
                continue;
            }
            slots.push(Self::compile_slot(property)?);
        }

        let max_slots = config.max_slots();
        let shape = ContainerShape::for_count(slots.len(), max_slots);
        let levels = ContainerShape::chain_len(slots.len(), max_slots);
        debug!(properties = properties.len(), dropped, %shape, levels, "compiled projection");
        Ok(Self::assemble(slots, max_slots))
    }

    /// Compile through the global cache when `config.cache_enabled`.
    pub fn compile_cached(properties: &[NamedProperty], config: &ProjectionConfig) -> Result<Arc<ProjectionPlan>, ProjectionError> {
        if config.cache_enabled {
            ProjectionCache::global().get_or_compile(properties, config)
        } else {
            Self::compile_with_config(properties, config).map(Arc::new)
        }
    }

    // Precedence: null check wraps truncation, truncation wraps the value.
    fn compile_slot(property: &NamedProperty) -> Result<SlotPlan, ProjectionError> {
        let label = property.label();

        let rule = match property.page_size {
            Some(page_size) => {
                if property.value.is_never_sequence() {
                    return Err(ProjectionError::InvalidShape { property: label, found: Self::static_kind(&property.value) });
                }
                SlotRule::Truncate { source: property.value.clone(), page_size }
            }
            None => {
                if let ValueExpr::Range { .. } = property.value {
                    return Err(ProjectionError::UnboundedRange { property: label });
                }
                SlotRule::Direct(property.value.clone())
            }
        };

        let rule = match &property.null_check {
            Some(check) => SlotRule::Guarded { check: check.clone(), inner: Box::new(rule) },
            None => rule,
        };

        Ok(SlotPlan {
            name: property.name.clone(),
            rule,
            auto_selected: property.auto_selected,
            label,
        })
    }

    fn static_kind(value: &ValueExpr) -> ValueKind {
        match value {
            ValueExpr::Literal(l) => ValueKind::of_value(&l.to_json()),
            ValueExpr::IsNull(_) => ValueKind::Bool,
            _ => ValueKind::Null,
        }
    }

    // Split into ladder-sized levels front to back, then link them back to front.
    fn assemble(slots: Vec<SlotPlan>, max_slots: usize) -> ProjectionPlan {
        let mut levels = Vec::new();
        let mut rest = slots;
        let (last_shape, last_slots) = loop {
            let shape = ContainerShape::for_count(rest.len(), max_slots);
            if !shape.has_next() {
                break (shape, rest);
            }
            let tail = rest.split_off(shape.capacity());
            levels.push((shape, rest));
            rest = tail;
        };

        let mut plan = ProjectionPlan::new(last_shape, last_slots, None);
        while let Some((shape, slots)) = levels.pop() {
            plan = ProjectionPlan::new(shape, slots, Some(plan));
        }
        plan
    }
}
