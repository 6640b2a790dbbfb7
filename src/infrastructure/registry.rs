use crate::domain::gateway::{Gateway, GatewayBackend};
use crate::domain::ports::GatewayRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed, name-keyed gateway fleet assembled at startup and resolved at
/// call time. Unknown identifiers simply resolve to `None`; the caller
/// turns that into a configuration error.
#[derive(Default)]
pub struct StaticGatewayRegistry {
    backends: HashMap<String, Arc<dyn GatewayBackend>>,
}

impl StaticGatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, backend: Arc<dyn GatewayBackend>) {
        self.backends.insert(backend.name().to_string(), backend);
    }

    pub fn with(mut self, backend: Arc<dyn GatewayBackend>) -> Self {
        self.register(backend);
        self
    }
}

impl GatewayRegistry for StaticGatewayRegistry {
    fn resolve(&self, name: &str) -> Option<Arc<dyn GatewayBackend>> {
        self.backends.get(name).cloned()
    }

    fn list(&self) -> Vec<Gateway> {
        let mut gateways: Vec<Gateway> = self
            .backends
            .keys()
            .map(|name| Gateway { name: name.clone() })
            .collect();
        gateways.sort_by(|a, b| a.name.cmp(&b.name));
        gateways
    }
}
