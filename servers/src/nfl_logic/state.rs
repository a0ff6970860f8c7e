use std::sync::Arc;

use lib_common::retrieve::PayloadSource;
use lib_common::sports::prizepicks::ProjectionService;

/// Shared handler state: one service, and through it one cache, per process.
pub struct AppState<S> {
    pub service: Arc<ProjectionService<S>>,
}

impl<S: PayloadSource> AppState<S> {
    pub fn new(service: ProjectionService<S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Label of the strategy chosen at startup.
    pub fn priority(&self) -> &'static str {
        self.service.source().label()
    }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
