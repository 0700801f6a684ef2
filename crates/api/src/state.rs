use std::sync::Arc;

use contact_db::store::MessageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Contact message storage (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn MessageStore>,
    /// Server configuration, read by the auth extractors.
    pub config: Arc<ServerConfig>,
}
