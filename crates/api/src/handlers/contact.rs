//! Handlers for contact messages.
//!
//! Submitting a message is public; listing and bulk deletion are staff only.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contact_core::contact::{parse_delete_ids, ContactSubmission, MessageFilter};
use contact_core::error::CoreError;
use contact_core::pagination::{paginate, Page, PageRequest};
use contact_db::models::contact_message::{ContactMessage, DeleteCount};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::ListMessagesParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /contact/messages
// ---------------------------------------------------------------------------

/// Store a contact-form submission.
pub async fn submit_message(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let input = input.clean()?;

    let message = state.store.create(&input).await?;

    tracing::info!(
        message_id = message.id,
        source = %message.source,
        "Contact message received",
    );

    Ok((StatusCode::CREATED, Json(message)))
}

// ---------------------------------------------------------------------------
// GET /contact/messages/admin
// ---------------------------------------------------------------------------

/// One page of messages, newest first.
///
/// The cursor and direction are validated before the store is touched.
pub async fn list_messages(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<ContactMessage>>> {
    let params = ListMessagesParams::from_pairs(pairs);
    let request = PageRequest::parse(
        params.limit.as_deref(),
        params.cursor.as_deref(),
        params.direction.as_deref(),
    )
    .map_err(CoreError::from)?;
    let filter = MessageFilter::from_query(params.q.as_deref());

    let page = paginate(state.store.as_ref(), &filter, &request).await?;

    tracing::debug!(
        user_id = staff.user_id,
        returned = page.results.len(),
        count = page.count,
        has_next = page.next_cursor.is_some(),
        has_prev = page.prev_cursor.is_some(),
        "Listed contact messages",
    );

    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// POST /contact/messages/admin/delete
// ---------------------------------------------------------------------------

/// Delete messages by id. Body: `{"ids": [1, 2, ...]}`.
pub async fn delete_messages(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<DeleteCount>> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let ids = parse_delete_ids(&body)?;

    let deleted = state.store.delete_many(&ids).await?;

    tracing::info!(
        user_id = staff.user_id,
        requested = ids.len(),
        deleted,
        "Contact messages deleted",
    );

    Ok(Json(DeleteCount { deleted }))
}
