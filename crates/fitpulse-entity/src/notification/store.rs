//! Storage seam for in-app notifications.

use async_trait::async_trait;

use fitpulse_core::AppResult;
use fitpulse_core::types::{NotificationId, UserId};

use super::model::Notification;

/// Persistence operations for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a new notification and return the stored row.
    async fn insert(&self, notification: &Notification) -> AppResult<Notification>;

    /// List a user's notifications, newest first, at most `limit` rows.
    async fn list_for_user(&self, user_id: UserId, limit: i64) -> AppResult<Vec<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark one notification read. Idempotent; returns `false` only when no
    /// such notification exists for that user.
    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> AppResult<bool>;

    /// Mark all of a user's notifications read. Returns how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;
}
