use std::fmt;

use crate::projection::ProjectionError;

/// Largest container rung used when no configuration says otherwise.
pub const DEFAULT_MAX_SLOTS: usize = 7;

/// Shape of one container level.
///
/// The family is a ladder of fixed capacities `1..=max` plus one overflow
/// shape holding `max` direct slots and a nested container for the rest.
/// Selection depends on the property count only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerShape {
    Empty,
    Fixed(usize),
    Overflow(usize),
}

impl ContainerShape {
    pub fn for_count(count: usize, max_slots: usize) -> Self {
        let max = max_slots.max(1);
        match count {
            0 => ContainerShape::Empty,
            c if c <= max => ContainerShape::Fixed(c),
            _ => ContainerShape::Overflow(max),
        }
    }

    /// Every shape available for a ladder of `max_slots`, smallest first.
    pub fn ladder(max_slots: usize) -> impl Iterator<Item = ContainerShape> {
        let max = max_slots.max(1);
        std::iter::once(ContainerShape::Empty)
            .chain((1..=max).map(ContainerShape::Fixed))
            .chain(std::iter::once(ContainerShape::Overflow(max)))
    }

    /// Number of container levels needed for `count` properties.
    pub fn chain_len(count: usize, max_slots: usize) -> usize {
        let max = max_slots.max(1);
        if count <= max { 1 } else { count.div_ceil(max) }
    }

    /// Direct slots of this level.
    pub fn capacity(&self) -> usize {
        match self {
            ContainerShape::Empty => 0,
            ContainerShape::Fixed(k) | ContainerShape::Overflow(k) => *k,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, ContainerShape::Overflow(_))
    }

    /// Verify that a level built for this shape holds the right number of
    /// slots and a nested container exactly when the shape overflows.
    pub fn check(&self, slots: usize, has_next: bool) -> Result<(), ProjectionError> {
        if slots != self.capacity() || has_next != self.has_next() {
            let expected = self.capacity() + usize::from(self.has_next());
            let actual = slots + usize::from(has_next);
            return Err(ProjectionError::ShapeOverflowInconsistency { shape: *self, expected, actual });
        }
        Ok(())
    }
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerShape::Empty => write!(f, "Empty"),
            ContainerShape::Fixed(k) => write!(f, "Fixed<{}>", k),
            ContainerShape::Overflow(k) => write!(f, "Overflow<{}>", k),
        }
    }
}
