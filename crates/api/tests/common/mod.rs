#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use contact_api::auth::jwt::{generate_access_token, JwtConfig};
use contact_api::config::ServerConfig;
use contact_api::router::build_app_router;
use contact_api::state::AppState;
use contact_core::contact::ContactSubmission;
use contact_db::models::contact_message::ContactMessage;
use contact_db::store::InMemoryMessageStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Full application router over the given in-memory store.
pub fn build_test_app(store: Arc<InMemoryMessageStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh store plus an app serving it.
pub fn app_with_store() -> (Router, Arc<InMemoryMessageStore>) {
    let store = Arc::new(InMemoryMessageStore::new());
    (build_test_app(Arc::clone(&store)), store)
}

pub fn token_for(role: &str) -> String {
    generate_access_token(1, role, &test_config().jwt).unwrap()
}

pub fn staff_token() -> String {
    token_for("staff")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_authed(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn submission(i: i64) -> ContactSubmission {
    ContactSubmission {
        name: format!("User {i}"),
        email: format!("user{i}@example.com"),
        subject: "Test".to_string(),
        message: "Message".to_string(),
        consent: true,
        source: "tests".to_string(),
    }
}

/// Insert `n` messages, ids 1..=n, each one second newer than the previous.
pub async fn seed_ascending(store: &InMemoryMessageStore, n: i64) -> Vec<ContactMessage> {
    let mut rows = Vec::new();
    for i in 1..=n {
        rows.push(
            store
                .insert_at(&submission(i), base_time() + Duration::seconds(i))
                .await,
        );
    }
    rows
}

/// Ids of `results` in response order.
pub fn result_ids(json: &serde_json::Value) -> Vec<i64> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}
