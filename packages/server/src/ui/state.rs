//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::BroadcastRegistry;

/// Shared application state
pub struct AppState {
    /// Registry of admitted connections and message history
    pub registry: Arc<BroadcastRegistry>,
    /// RFC 3339 time the server was started
    pub started_at: String,
}
