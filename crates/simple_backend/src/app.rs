use std::sync::Arc;

use simple_backend_config::SimpleBackendConfig;

/// State which the server framework owns. Business logic state wraps this.
#[derive(Clone)]
pub struct SimpleBackendAppState {
    pub config: Arc<SimpleBackendConfig>,
}

impl SimpleBackendAppState {
    pub fn new(config: Arc<SimpleBackendConfig>) -> Self {
        Self { config }
    }
}

pub trait GetSimpleBackendConfig {
    fn simple_backend_config(&self) -> &SimpleBackendConfig;
}

impl GetSimpleBackendConfig for SimpleBackendAppState {
    fn simple_backend_config(&self) -> &SimpleBackendConfig {
        &self.config
    }
}
