//! Route definitions for contact messages.
//!
//! Mounted at `/contact` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Contact message routes.
///
/// ```text
/// POST   /messages                 -> submit_message
/// GET    /messages/admin           -> list_messages (staff)
/// POST   /messages/admin/delete    -> delete_messages (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(contact::submit_message))
        .route("/messages/admin", get(contact::list_messages))
        .route("/messages/admin/delete", post(contact::delete_messages))
}
