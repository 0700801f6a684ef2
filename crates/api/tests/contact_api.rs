//! Integration tests for submitting and deleting contact messages.

mod common;

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{app_with_store, body_json, post_json, seed_ascending, send, staff_token, token_for};
use contact_core::contact::MessageFilter;
use contact_core::pagination::PageSource;
use serde_json::json;

const SUBMIT: &str = "/api/contact/messages";
const DELETE: &str = "/api/contact/messages/admin/delete";

fn payload(consent: bool) -> serde_json::Value {
    json!({
        "name": "Test",
        "email": "test@example.com",
        "subject": "Hello",
        "message": "Test message",
        "consent": consent,
        "source": "tests",
    })
}

async fn stored(store: &contact_db::store::InMemoryMessageStore) -> i64 {
    store.count(&MessageFilter::default()).await.unwrap()
}

// ---------------------------------------------------------------------------
// POST /api/contact/messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_with_consent_is_stored() {
    let (app, store) = app_with_store();
    let response = post_json(app, SUBMIT, payload(true), None).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Test");
    assert_eq!(json["consent"], true);
    assert!(json["created_at"].is_string());
    assert_eq!(stored(&store).await, 1);
}

#[tokio::test]
async fn submission_without_consent_is_rejected() {
    let (app, store) = app_with_store();
    let response = post_json(app, SUBMIT, payload(false), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(stored(&store).await, 0);
}

#[tokio::test]
async fn subject_is_optional() {
    let (app, store) = app_with_store();
    let body = json!({
        "name": "Test",
        "email": "test@example.com",
        "message": "Test message",
        "consent": true,
    });
    let response = post_json(app, SUBMIT, body, None).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(stored(&store).await, 1);
}

#[tokio::test]
async fn missing_required_field_is_a_bad_request() {
    let (app, store) = app_with_store();
    let body = json!({ "email": "test@example.com", "message": "Hi", "consent": true });
    let response = post_json(app, SUBMIT, body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert_eq!(stored(&store).await, 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let (app, _store) = app_with_store();
    let mut body = payload(true);
    body["email"] = json!("nope");
    let response = post_json(app, SUBMIT, body, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _store) = app_with_store();
    let request = Request::builder()
        .method(Method::POST)
        .uri(SUBMIT)
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// POST /api/contact/messages/admin/delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_requires_staff() {
    let (app, _store) = app_with_store();
    let anonymous = post_json(app.clone(), DELETE, json!({ "ids": [1] }), None).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let user = post_json(app, DELETE, json!({ "ids": [1] }), Some(&token_for("user"))).await;
    assert_eq!(user.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_removes_listed_ids() {
    let (app, store) = app_with_store();
    seed_ascending(&store, 3).await;

    let response = post_json(app, DELETE, json!({ "ids": [1, "3", 99] }), Some(&staff_token())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted"], 2);
    assert_eq!(stored(&store).await, 1);
}

#[tokio::test]
async fn delete_rejects_bad_id_lists() {
    let (app, store) = app_with_store();
    seed_ascending(&store, 1).await;
    let token = staff_token();

    for (body, message) in [
        (json!({ "ids": "1" }), "ids must be a list."),
        (json!({ "ids": [1, "x"] }), "ids must be integers."),
        (json!({ "ids": [] }), "ids list is empty."),
    ] {
        let response = post_json(app.clone(), DELETE, body, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_matches!(json["error"].as_str(), Some(m) if m == message);
    }
    assert_eq!(stored(&store).await, 1);
}
