use crate::projection::DEFAULT_MAX_SLOTS;

/// Projection compiler configuration.
///
/// - `max_slots` is the largest container rung; more properties chain into
///   overflow containers.
/// - `cache_enabled` lets [`crate::projection::ProjectionCompiler::compile_cached`]
///   reuse plans from the global cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Direct slots per container before overflow chaining kicks in
    pub max_slots: usize,
    /// Whether compiled plans are shared through the global cache
    pub cache_enabled: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { max_slots: DEFAULT_MAX_SLOTS, cache_enabled: true }
    }
}

impl ProjectionConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with a custom ladder size; clamped to at least one slot.
    pub fn with_max_slots(max_slots: usize) -> Self {
        Self { max_slots: max_slots.max(1), ..Self::default() }
    }

    /// Configuration that always compiles fresh plans.
    pub fn without_cache() -> Self {
        Self { cache_enabled: false, ..Self::default() }
    }

    /// Effective ladder size, never zero.
    pub fn max_slots(&self) -> usize {
        self.max_slots.max(1)
    }
}
