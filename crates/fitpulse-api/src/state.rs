//! Application state shared across all handlers.

use std::sync::Arc;

use fitpulse_core::config::AppConfig;
use fitpulse_service::{NotificationService, ReminderService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Reminder lifecycle service
    pub reminder_service: Arc<ReminderService>,
    /// Notification inbox service
    pub notification_service: Arc<NotificationService>,
}
