//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use fitpulse_core::types::NotificationId;
use fitpulse_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse, MarkAllReadResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::list::InboxParams;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<InboxParams>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state
        .notification_service
        .list(auth.context(), params.capped_limit())
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(auth.context()).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.mark_read(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkAllReadResponse>>, ApiError> {
    let count = state.notification_service.mark_all_read(auth.context()).await?;
    Ok(Json(ApiResponse::ok(MarkAllReadResponse { marked: count })))
}
