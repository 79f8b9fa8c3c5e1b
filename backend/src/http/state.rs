//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::SearchSettings;
use crate::db::repository::FullRepository;
use crate::services::SearchDispatcher;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for direct venue lookups
    pub repository: Arc<dyn FullRepository>,
    /// Search service sharing the same repository
    pub dispatcher: SearchDispatcher,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>, settings: SearchSettings) -> Self {
        let dispatcher = SearchDispatcher::new(Arc::clone(&repository), settings);
        Self {
            repository,
            dispatcher,
        }
    }
}
