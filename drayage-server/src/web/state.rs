//! Application state for the web layer.

use std::sync::Arc;

use crate::matcher::MatchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Street-turn matcher configuration
    pub config: Arc<MatchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
