//! Server state shared by every handler.

use std::sync::Arc;

use crate::{domain::RelayRepository, infrastructure::repository::InMemoryRelayRepository};

/// Shared application state.
///
/// Built once by the runner at process start; every handler receives the
/// same instance, so there is exactly one relay per process.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RelayRepository>,
}

impl AppState {
    /// State backed by the in-memory relay repository
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryRelayRepository::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
