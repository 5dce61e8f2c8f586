//! Shared application state.

use std::sync::Arc;

use salesdesk_db::Database;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(AppState { db })
    }
}

pub type SharedState = Arc<AppState>;
