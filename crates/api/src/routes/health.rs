use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Reachability of one dependency.
#[derive(Serialize)]
pub struct DependencyStatus {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Whether every dependency is reachable.
    pub ok: bool,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Message storage.
    pub db: DependencyStatus,
    /// Present on `/health/ready` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
}

#[derive(Serialize)]
pub struct LiveResponse {
    pub ok: bool,
    pub live: bool,
}

async fn check_dependencies(state: &AppState) -> HealthResponse {
    let db = match state.store.ping().await {
        Ok(()) => DependencyStatus {
            ok: true,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            DependencyStatus {
                ok: false,
                error: Some(e.to_string()),
            }
        }
    };

    HealthResponse {
        ok: db.ok,
        version: env!("CARGO_PKG_VERSION"),
        db,
        ready: None,
    }
}

fn status_for(ok: bool) -> StatusCode {
    if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health -- 200 when storage is reachable, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = check_dependencies(&state).await;
    (status_for(status.ok), Json(status))
}

/// GET /health/live -- the process is up and serving.
async fn live() -> Json<LiveResponse> {
    Json(LiveResponse {
        ok: true,
        live: true,
    })
}

/// GET /health/ready -- like `/health`, plus a `ready` flag.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut status = check_dependencies(&state).await;
    status.ready = Some(status.ok);
    (status_for(status.ok), Json(status))
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/live", get(live))
        .route("/health/ready", get(ready))
}
