//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Present only with the postgres backend
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
