use std::{collections::HashMap, sync::{Arc, RwLock}};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    expression::NamedProperty,
    projection::{ProjectionCompiler, ProjectionConfig, ProjectionError, ProjectionPlan},
};

static GLOBAL_CACHE: Lazy<ProjectionCache> = Lazy::new(ProjectionCache::new);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    max_slots: usize,
    properties: Vec<NamedProperty>,
}

/// Append-only cache of compiled plans keyed by the ordered descriptor list.
///
/// Entries are never evicted or replaced; when two threads compile the same
/// key concurrently the first insert wins and both get that plan.
/// Failed compilations are not cached.
#[derive(Default)]
pub struct ProjectionCache {
    plans: RwLock<HashMap<CacheKey, Arc<ProjectionPlan>>>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self { plans: RwLock::new(HashMap::new()) }
    }

    /// Process-wide cache used by [`ProjectionCompiler::compile_cached`].
    pub fn global() -> &'static ProjectionCache {
        &GLOBAL_CACHE
    }

    pub fn get_or_compile(&self, properties: &[NamedProperty], config: &ProjectionConfig) -> Result<Arc<ProjectionPlan>, ProjectionError> {
        let key = CacheKey { max_slots: config.max_slots(), properties: properties.to_vec() };

        {
            let plans = self.plans.read().map_err(|_| Self::poisoned())?;
            if let Some(plan) = plans.get(&key) {
                debug!(properties = properties.len(), "projection cache hit");
                return Ok(Arc::clone(plan));
            }
        }

        debug!(properties = properties.len(), "projection cache miss");
        let plan = Arc::new(ProjectionCompiler::compile_with_config(properties, config)?);
        let mut plans = self.plans.write().map_err(|_| Self::poisoned())?;
        Ok(Arc::clone(plans.entry(key).or_insert(plan)))
    }

    /// Number of cached plans. Entries are only ever inserted whole, so the
    /// count stays meaningful after a panic poisoned the lock.
    pub fn len(&self) -> usize {
        match self.plans.read() {
            Ok(plans) => plans.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> ProjectionError {
        ProjectionError::Other("projection cache lock poisoned".into())
    }
}
