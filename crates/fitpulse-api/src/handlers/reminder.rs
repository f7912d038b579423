//! Reminder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use fitpulse_core::error::AppError;
use fitpulse_core::types::ReminderId;
use fitpulse_entity::reminder::Reminder;

use crate::dto::request::{CreateReminderRequest, ToggleReminderRequest, UpdateReminderRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ListParams};
use crate::state::AppState;

/// POST /api/reminders
pub async fn create_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReminderRequest>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let reminder = state
        .reminder_service
        .create(auth.context(), req.into_input())
        .await?;
    Ok(Json(ApiResponse::ok(reminder)))
}

/// GET /api/reminders
pub async fn list_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<Reminder>>>, ApiError> {
    let reminders = state
        .reminder_service
        .list(auth.context(), &params.into_filter())
        .await?;
    Ok(Json(ApiResponse::ok(reminders)))
}

/// GET /api/reminders/{id}
pub async fn get_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let reminder = state.reminder_service.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(reminder)))
}

/// PATCH /api/reminders/{id}
pub async fn update_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
    Json(req): Json<UpdateReminderRequest>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let reminder = state
        .reminder_service
        .update(auth.context(), id, req.into_input())
        .await?;
    Ok(Json(ApiResponse::ok(reminder)))
}

/// DELETE /api/reminders/{id}
pub async fn delete_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.reminder_service.soft_delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Reminder deleted".to_string(),
    })))
}

/// POST /api/reminders/{id}/toggle
pub async fn toggle_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
    Json(req): Json<ToggleReminderRequest>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let reminder = state
        .reminder_service
        .toggle(auth.context(), id, req.active)
        .await?;
    Ok(Json(ApiResponse::ok(reminder)))
}

/// POST /api/reminders/{id}/snooze
pub async fn snooze_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let reminder = state.reminder_service.snooze(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(reminder)))
}

/// POST /api/reminders/{id}/test-send
pub async fn send_test_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReminderId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.reminder_service.test_send(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Test notification sent".to_string(),
    })))
}
