//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::ListStore;

/// State shared across handlers
///
/// Generic over the list store so the router can be driven against any
/// [`ListStore`] implementation.
#[derive(Clone)]
pub struct AppState<S> {
    config: Arc<Config>,
    lists: S,
}

impl<S: ListStore> AppState<S> {
    /// Create a new AppState from loaded configuration and a store
    pub fn new(config: Config, lists: S) -> Self {
        Self {
            config: Arc::new(config),
            lists,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the list store
    pub fn lists(&self) -> &S {
        &self.lists
    }
}
