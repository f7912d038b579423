//! In-memory store and sink implementations for tests.
//!
//! These mirror the row-level semantics of the Postgres repositories
//! (owner scoping, soft-delete exclusion, conditional dispatch commits) so
//! service, dispatcher, and API tests all exercise the same contract
//! without a database.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fitpulse_core::types::{NotificationId, ReminderId, UserId};
use fitpulse_core::{AppError, AppResult};

use crate::notification::{Notification, NotificationSink, NotificationStore};
use crate::reminder::{Reminder, ReminderListFilter, ReminderStore};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`ReminderStore`].
#[derive(Debug, Default)]
pub struct MemoryReminderStore {
    rows: Mutex<HashMap<ReminderId, Reminder>>,
    force_dispatch_conflict: AtomicBool,
}

impl MemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `record_dispatch` report a lost conditional
    /// write, as if another writer always got there first.
    pub fn force_dispatch_conflict(&self) {
        self.force_dispatch_conflict.store(true, Ordering::SeqCst);
    }

    /// Read a row directly, ignoring owner scoping and soft deletes.
    pub fn snapshot(&self, id: ReminderId) -> Option<Reminder> {
        lock(&self.rows).get(&id).cloned()
    }

    /// Number of stored rows, soft-deleted included.
    pub fn row_count(&self) -> usize {
        lock(&self.rows).len()
    }
}

#[async_trait]
impl ReminderStore for MemoryReminderStore {
    async fn insert(&self, reminder: &Reminder) -> AppResult<Reminder> {
        lock(&self.rows).insert(reminder.id, reminder.clone());
        Ok(reminder.clone())
    }

    async fn find_for_owner(
        &self,
        id: ReminderId,
        owner: UserId,
    ) -> AppResult<Option<Reminder>> {
        Ok(lock(&self.rows)
            .get(&id)
            .filter(|r| r.user_id == owner && r.soft_deleted_at.is_none())
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: &ReminderListFilter,
    ) -> AppResult<Vec<Reminder>> {
        let mut rows: Vec<Reminder> = lock(&self.rows)
            .values()
            .filter(|r| r.user_id == owner && r.soft_deleted_at.is_none())
            .filter(|r| {
                filter
                    .status
                    .is_none_or(|status| r.is_active == status.as_active())
            })
            .filter(|r| filter.kind.is_none_or(|kind| r.kind == kind))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Reminder>> {
        let mut rows: Vec<Reminder> = lock(&self.rows)
            .values()
            .filter(|r| r.is_active && r.soft_deleted_at.is_none())
            .filter(|r| r.next_run_at.is_some_and(|next| next <= now))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.next_run_at);
        Ok(rows.into_iter().take(limit.max(0) as usize).collect())
    }

    async fn update(
        &self,
        reminder: &Reminder,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<Reminder> {
        let mut rows = lock(&self.rows);
        match rows.get(&reminder.id) {
            Some(current)
                if current.user_id == reminder.user_id
                    && current.soft_deleted_at.is_none()
                    && current.updated_at == expected_updated_at =>
            {
                let mut stored = reminder.clone();
                stored.updated_at = Utc::now();
                rows.insert(stored.id, stored.clone());
                Ok(stored)
            }
            _ => Err(AppError::conflict("Reminder was modified concurrently")),
        }
    }

    async fn set_active(
        &self,
        id: ReminderId,
        owner: UserId,
        active: bool,
    ) -> AppResult<Option<Reminder>> {
        let mut rows = lock(&self.rows);
        let Some(row) = rows
            .get_mut(&id)
            .filter(|r| r.user_id == owner && r.soft_deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.is_active = active;
        if !active {
            row.next_run_at = None;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn snooze_until(
        &self,
        id: ReminderId,
        owner: UserId,
        until: DateTime<Utc>,
    ) -> AppResult<Option<Reminder>> {
        let mut rows = lock(&self.rows);
        let Some(row) = rows
            .get_mut(&id)
            .filter(|r| r.user_id == owner && r.soft_deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.next_run_at = Some(until);
        row.is_active = true;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn soft_delete(
        &self,
        id: ReminderId,
        owner: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut rows = lock(&self.rows);
        let Some(row) = rows
            .get_mut(&id)
            .filter(|r| r.user_id == owner && r.soft_deleted_at.is_none())
        else {
            return Ok(false);
        };
        row.soft_deleted_at = Some(now);
        row.is_active = false;
        row.next_run_at = None;
        row.updated_at = Utc::now();
        Ok(true)
    }

    async fn record_dispatch(
        &self,
        id: ReminderId,
        expected_next_run_at: DateTime<Utc>,
        last_run_at: DateTime<Utc>,
        next_run_at: Option<DateTime<Utc>>,
        active: bool,
    ) -> AppResult<bool> {
        if self.force_dispatch_conflict.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let mut rows = lock(&self.rows);
        let Some(row) = rows.get_mut(&id).filter(|r| {
            r.is_active
                && r.soft_deleted_at.is_none()
                && r.next_run_at == Some(expected_next_run_at)
        }) else {
            return Ok(false);
        };
        row.last_run_at = Some(last_run_at);
        row.next_run_at = next_run_at;
        row.is_active = active;
        row.updated_at = Utc::now();
        Ok(true)
    }
}

/// One delivery captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredNotification {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// [`NotificationSink`] that records deliveries and can fail on demand.
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<DeliveredNotification>>,
    fail_users: Mutex<HashSet<UserId>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery to this user fail.
    pub fn fail_deliveries_to(&self, user_id: UserId) {
        lock(&self.fail_users).insert(user_id);
    }

    /// All deliveries recorded so far, in order.
    pub fn deliveries(&self) -> Vec<DeliveredNotification> {
        lock(&self.deliveries).clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, user_id: UserId, title: &str, body: &str) -> AppResult<()> {
        if lock(&self.fail_users).contains(&user_id) {
            return Err(AppError::delivery("Simulated delivery failure"));
        }
        lock(&self.deliveries).push(DeliveredNotification {
            user_id,
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// In-memory [`NotificationStore`].
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    rows: Mutex<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<Notification> {
        lock(&self.rows).push(notification.clone());
        Ok(notification.clone())
    }

    async fn list_for_user(&self, user_id: UserId, limit: i64) -> AppResult<Vec<Notification>> {
        let mut rows: Vec<Notification> = lock(&self.rows)
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows.into_iter().take(limit.max(0) as usize).collect())
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        Ok(lock(&self.rows)
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let mut rows = lock(&self.rows);
        let Some(row) = rows
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        else {
            return Ok(false);
        };
        row.is_read = true;
        row.read_at.get_or_insert_with(Utc::now);
        Ok(true)
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut rows = lock(&self.rows);
        let mut changed = 0u64;
        for row in rows.iter_mut().filter(|n| n.user_id == user_id && !n.is_read) {
            row.is_read = true;
            row.read_at = Some(Utc::now());
            changed += 1;
        }
        Ok(changed)
    }
}
