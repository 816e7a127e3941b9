use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::routing::{CandidateAction, ControllerDescriptor, RouteDescriptor, RouteValue, SUB_ROUTE_DATA_KEY};

/// Values captured by a matched route. A union route stores the data of every
/// matching sub-route under [`SUB_ROUTE_DATA_KEY`].
#[derive(Debug, Clone, Default)]
pub struct RouteData {
    pub values: IndexMap<String, RouteValue>,
    pub route: Option<Arc<RouteDescriptor>>,
}

impl RouteData {
    pub fn new(route: Option<Arc<RouteDescriptor>>) -> Self {
        Self { values: IndexMap::new(), route }
    }

    /// Route data for a union route made of `sub_routes`.
    pub fn union(sub_routes: Vec<RouteData>) -> Self {
        let mut data = Self::new(None);
        data.values.insert(SUB_ROUTE_DATA_KEY.to_string(), RouteValue::SubRoutes(sub_routes));
        data
    }

    pub fn with_value(mut self, key: &str, value: impl Into<RouteValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Drop every optional parameter that received no value, here and in
    /// every sub-route.
    pub fn remove_optional_parameters(&mut self) {
        let before = self.values.len();
        self.values.retain(|_, value| !value.is_optional());
        trace!(removed = before - self.values.len(), "removed optional route parameters");

        if let Some(RouteValue::SubRoutes(sub_routes)) = self.values.get_mut(SUB_ROUTE_DATA_KEY) {
            for sub in sub_routes {
                sub.remove_optional_parameters();
            }
        }
    }

    pub fn sub_routes(&self) -> Option<&[RouteData]> {
        match self.values.get(SUB_ROUTE_DATA_KEY) {
            Some(RouteValue::SubRoutes(sub_routes)) => Some(sub_routes),
            _ => None,
        }
    }

    /// Actions this route may dispatch to. A union route gathers the
    /// candidates of its sub-routes; any other route reports its own.
    pub fn direct_route_candidates(&self) -> Option<Vec<CandidateAction>> {
        match self.sub_routes() {
            Some(sub_routes) => Some(
                sub_routes.iter()
                    .filter_map(|sub| sub.route.as_ref()?.candidates.as_ref())
                    .flatten()
                    .cloned()
                    .collect(),
            ),
            None => self.route.as_ref()?.candidates.clone(),
        }
    }

    /// The controller shared by every candidate action, or `None` when there
    /// are no candidates or they disagree.
    pub fn direct_route_controller(&self) -> Option<Arc<ControllerDescriptor>> {
        let candidates = self.direct_route_candidates()?;
        let (first, rest) = candidates.split_first()?;
        let controller = first.controller();
        if rest.iter().all(|c| Arc::ptr_eq(c.controller(), controller)) {
            Some(Arc::clone(controller))
        } else {
            None
        }
    }
}
