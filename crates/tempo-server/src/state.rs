//! Shared application state

use crate::docs;
use std::fmt;
use std::sync::Arc;
use tempo_config::Config;
use tempo_core::TimeProvider;

/// Read-only state shared by all handlers. Constructed once at
/// startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration
    pub config: Arc<Config>,
    /// Clock used by the time endpoint
    pub clock: Arc<dyn TimeProvider>,
    /// Pre-built OpenAPI document
    pub openapi: Arc<utoipa::openapi::OpenApi>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state with the given clock.
    pub fn new(config: Arc<Config>, clock: Arc<dyn TimeProvider>) -> Self {
        let openapi = Arc::new(docs::openapi(&config));
        Self {
            config,
            clock,
            openapi,
        }
    }
}
