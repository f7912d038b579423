//! In-app notification inbox and delivery.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use fitpulse_core::types::{NotificationId, UserId};
use fitpulse_core::{AppError, AppResult, ErrorKind};
use fitpulse_entity::notification::{Notification, NotificationSink, NotificationStore};

use crate::context::RequestContext;

/// Service for the in-app notification inbox.
///
/// Doubles as the [`NotificationSink`] the dispatcher delivers through:
/// "delivering" a reminder means appending a row to the owner's inbox.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// List the caller's notifications, newest first.
    pub async fn list(&self, ctx: &RequestContext, limit: i64) -> AppResult<Vec<Notification>> {
        self.store.list_for_user(ctx.user_id, limit).await
    }

    /// Number of unread notifications for the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Mark one of the caller's notifications as read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<()> {
        let marked = self.store.mark_read(id, ctx.user_id).await?;
        if !marked {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Mark all of the caller's notifications as read. Returns how many
    /// were still unread.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.mark_all_read(ctx.user_id).await
    }
}

#[async_trait]
impl NotificationSink for NotificationService {
    async fn deliver(&self, user_id: UserId, title: &str, body: &str) -> AppResult<()> {
        let notification = Notification {
            id: NotificationId::new(),
            user_id,
            title: title.to_string(),
            body: body.to_string(),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        self.store.insert(&notification).await.map_err(|e| {
            AppError::with_source(ErrorKind::Delivery, "Failed to deliver notification", e)
        })?;
        debug!(notification_id = %notification.id, %user_id, "Delivered notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitpulse_entity::testing::MemoryNotificationStore;

    fn service() -> (NotificationService, Arc<MemoryNotificationStore>) {
        let store = Arc::new(MemoryNotificationStore::new());
        (NotificationService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn deliver_appends_unread_notification() {
        let (service, _) = service();
        let user = UserId::new();
        let ctx = RequestContext::new(user);

        service.deliver(user, "Reminder", "Drink water").await.unwrap();

        let listed = service.list(&ctx, 50).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Reminder");
        assert_eq!(listed[0].body, "Drink water");
        assert!(!listed[0].is_read);
        assert!(listed[0].read_at.is_none());
        assert_eq!(service.unread_count(&ctx).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn inbox_is_scoped_per_user() {
        let (service, _) = service();
        let alice = UserId::new();
        let bob = UserId::new();

        service.deliver(alice, "Reminder", "For Alice").await.unwrap();

        let bob_ctx = RequestContext::new(bob);
        assert!(service.list(&bob_ctx, 50).await.unwrap().is_empty());
        assert_eq!(service.unread_count(&bob_ctx).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mark_read_clears_unread_count() {
        let (service, _) = service();
        let user = UserId::new();
        let ctx = RequestContext::new(user);

        service.deliver(user, "Reminder", "One").await.unwrap();
        let id = service.list(&ctx, 50).await.unwrap()[0].id;

        service.mark_read(&ctx, id).await.unwrap();
        assert_eq!(service.unread_count(&ctx).await.unwrap(), 0);

        let listed = service.list(&ctx, 50).await.unwrap();
        assert!(listed[0].is_read);
        let first_read_at = listed[0].read_at;
        assert!(first_read_at.is_some());

        // Retrying the mark succeeds without touching read_at.
        service.mark_read(&ctx, id).await.unwrap();
        let listed = service.list(&ctx, 50).await.unwrap();
        assert_eq!(listed[0].read_at, first_read_at);

        // A foreign caller still sees nothing.
        let stranger = RequestContext::new(UserId::new());
        let err = service.mark_read(&stranger, id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn mark_all_read_reports_affected_count() {
        let (service, _) = service();
        let user = UserId::new();
        let ctx = RequestContext::new(user);

        service.deliver(user, "Reminder", "One").await.unwrap();
        service.deliver(user, "Reminder", "Two").await.unwrap();
        service.deliver(user, "Reminder", "Three").await.unwrap();

        assert_eq!(service.mark_all_read(&ctx).await.unwrap(), 3);
        assert_eq!(service.unread_count(&ctx).await.unwrap(), 0);
        assert_eq!(service.mark_all_read(&ctx).await.unwrap(), 0);
    }
}
