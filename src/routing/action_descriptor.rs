use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct ControllerDescriptor {
    pub name: String,
}

impl ControllerDescriptor {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self { name: name.to_string() })
    }
}

#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub name: String,
    pub controller: Arc<ControllerDescriptor>,
}

impl ActionDescriptor {
    pub fn new(name: &str, controller: &Arc<ControllerDescriptor>) -> Arc<Self> {
        Arc::new(Self { name: name.to_string(), controller: Arc::clone(controller) })
    }
}

/// Action an attribute route may dispatch to, with its ordering hints.
/// Action selection still has to pick among candidates.
#[derive(Debug, Clone)]
pub struct CandidateAction {
    pub action: Arc<ActionDescriptor>,
    pub order: i32,
    pub precedence: f64,
}

impl CandidateAction {
    pub fn new(action: &Arc<ActionDescriptor>) -> Self {
        Self { action: Arc::clone(action), order: 0, precedence: 0.0 }
    }

    pub fn controller(&self) -> &Arc<ControllerDescriptor> {
        &self.action.controller
    }
}

/// A route known to the router. Attribute routes carry their candidates,
/// conventional routes carry none.
#[derive(Debug, Clone, Default)]
pub struct RouteDescriptor {
    pub template: String,
    pub candidates: Option<Vec<CandidateAction>>,
}

impl RouteDescriptor {
    pub fn conventional(template: &str) -> Arc<Self> {
        Arc::new(Self { template: template.to_string(), candidates: None })
    }

    pub fn attribute(template: &str, candidates: Vec<CandidateAction>) -> Arc<Self> {
        Arc::new(Self { template: template.to_string(), candidates: Some(candidates) })
    }
}
