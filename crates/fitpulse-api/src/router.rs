//! Route definitions for the FitPulse HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(reminder_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Reminder CRUD and lifecycle actions
fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", post(handlers::reminder::create_reminder))
        .route("/reminders", get(handlers::reminder::list_reminders))
        .route("/reminders/{id}", get(handlers::reminder::get_reminder))
        .route("/reminders/{id}", patch(handlers::reminder::update_reminder))
        .route(
            "/reminders/{id}",
            delete(handlers::reminder::delete_reminder),
        )
        .route(
            "/reminders/{id}/toggle",
            post(handlers::reminder::toggle_reminder),
        )
        .route(
            "/reminders/{id}/snooze",
            post(handlers::reminder::snooze_reminder),
        )
        .route(
            "/reminders/{id}/test-send",
            post(handlers::reminder::send_test_notification),
        )
}

/// Notification inbox endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Liveness endpoint, no auth required
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
