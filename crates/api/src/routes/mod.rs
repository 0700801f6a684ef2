pub mod contact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                          service + storage health (public)
/// /health/live                     liveness (public)
/// /health/ready                    readiness (public)
///
/// /contact/messages                submit (public, POST)
/// /contact/messages/admin          cursor-paginated listing (staff, GET)
/// /contact/messages/admin/delete   bulk delete (staff, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/contact", contact::router())
}
