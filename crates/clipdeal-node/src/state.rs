//! Application state.

use std::sync::Arc;

use clipdeal_store::{InMemoryStore, MarketStore};

/// Shared application state: the store is the only cross-request resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
}

impl AppState {
    /// Create a new application state backed by the in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
