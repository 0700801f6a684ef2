//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly, no router involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use contact_api::error::AppError;
use contact_core::cursor::CursorError;
use contact_core::error::CoreError;
use contact_db::store::StoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("bad field".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "bad field");
}

#[tokio::test]
async fn invalid_cursor_returns_400_with_description() {
    let err = AppError::Core(CoreError::from(CursorError::Encoding));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_CURSOR");
    assert_eq!(json["error"], "cursor is not valid base64url");
}

#[tokio::test]
async fn invalid_direction_returns_400() {
    let err = AppError::Core(CoreError::from(CursorError::Direction("up".into())));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "direction must be 'next' or 'prev', got 'up'");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn forbidden_returns_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("staff only".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("oops".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn database_error_is_sanitized_500() {
    let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn unavailable_store_returns_503() {
    let err = AppError::Store(StoreError::Unavailable("down".into()));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}
