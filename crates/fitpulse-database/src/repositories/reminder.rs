//! Reminder store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fitpulse_core::error::{AppError, ErrorKind};
use fitpulse_core::result::AppResult;
use fitpulse_core::types::{ReminderId, UserId};
use fitpulse_entity::reminder::{Reminder, ReminderListFilter, ReminderStore};

/// Postgres-backed [`ReminderStore`].
///
/// Every mutation is a single conditional statement so concurrent writers
/// to the same row cannot interleave a read-then-write; the dispatcher's
/// commit additionally guards on the `next_run_at` it selected.
#[derive(Debug, Clone)]
pub struct PgReminderStore {
    pool: PgPool,
}

impl PgReminderStore {
    /// Create a new reminder store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderStore for PgReminderStore {
    async fn insert(&self, reminder: &Reminder) -> AppResult<Reminder> {
        sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders (id, user_id, kind, message, scheduled_time, days_of_week, \
             is_recurring, is_active, start_date, end_date, utc_offset, next_run_at, \
             last_run_at, soft_deleted_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING *",
        )
        .bind(reminder.id)
        .bind(reminder.user_id)
        .bind(reminder.kind)
        .bind(&reminder.message)
        .bind(reminder.scheduled_time)
        .bind(reminder.days_of_week)
        .bind(reminder.is_recurring)
        .bind(reminder.is_active)
        .bind(reminder.start_date)
        .bind(reminder.end_date)
        .bind(&reminder.utc_offset)
        .bind(reminder.next_run_at)
        .bind(reminder.last_run_at)
        .bind(reminder.soft_deleted_at)
        .bind(reminder.created_at)
        .bind(reminder.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert reminder", e))
    }

    async fn find_for_owner(
        &self,
        id: ReminderId,
        owner: UserId,
    ) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders \
             WHERE id = $1 AND user_id = $2 AND soft_deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reminder", e))
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: &ReminderListFilter,
    ) -> AppResult<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders \
             WHERE user_id = $1 AND soft_deleted_at IS NULL \
             AND ($2::boolean IS NULL OR is_active = $2) \
             AND ($3::reminder_kind IS NULL OR kind = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5",
        )
        .bind(owner)
        .bind(filter.status.map(|s| s.as_active()))
        .bind(filter.kind)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reminders", e))
    }

    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders \
             WHERE next_run_at <= $1 AND is_active = TRUE AND soft_deleted_at IS NULL \
             ORDER BY next_run_at ASC \
             LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query due reminders", e))
    }

    async fn update(
        &self,
        reminder: &Reminder,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<Reminder> {
        sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET kind = $2, message = $3, scheduled_time = $4, \
             days_of_week = $5, is_recurring = $6, is_active = $7, start_date = $8, \
             end_date = $9, utc_offset = $10, next_run_at = $11, updated_at = NOW() \
             WHERE id = $1 AND user_id = $12 AND updated_at = $13 AND soft_deleted_at IS NULL \
             RETURNING *",
        )
        .bind(reminder.id)
        .bind(reminder.kind)
        .bind(&reminder.message)
        .bind(reminder.scheduled_time)
        .bind(reminder.days_of_week)
        .bind(reminder.is_recurring)
        .bind(reminder.is_active)
        .bind(reminder.start_date)
        .bind(reminder.end_date)
        .bind(&reminder.utc_offset)
        .bind(reminder.next_run_at)
        .bind(reminder.user_id)
        .bind(expected_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update reminder", e))?
        .ok_or_else(|| AppError::conflict("Reminder was modified concurrently"))
    }

    async fn set_active(
        &self,
        id: ReminderId,
        owner: UserId,
        active: bool,
    ) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "UPDATE reminders \
             SET is_active = $3, \
             next_run_at = CASE WHEN $3 THEN next_run_at ELSE NULL END, \
             updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND soft_deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle reminder", e))
    }

    async fn snooze_until(
        &self,
        id: ReminderId,
        owner: UserId,
        until: DateTime<Utc>,
    ) -> AppResult<Option<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "UPDATE reminders \
             SET next_run_at = $3, is_active = TRUE, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND soft_deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(until)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to snooze reminder", e))
    }

    async fn soft_delete(
        &self,
        id: ReminderId,
        owner: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reminders \
             SET soft_deleted_at = $3, is_active = FALSE, next_run_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND soft_deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete reminder", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_dispatch(
        &self,
        id: ReminderId,
        expected_next_run_at: DateTime<Utc>,
        last_run_at: DateTime<Utc>,
        next_run_at: Option<DateTime<Utc>>,
        active: bool,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reminders \
             SET last_run_at = $3, next_run_at = $4, is_active = $5, updated_at = NOW() \
             WHERE id = $1 AND next_run_at = $2 \
             AND is_active = TRUE AND soft_deleted_at IS NULL",
        )
        .bind(id)
        .bind(expected_next_run_at)
        .bind(last_run_at)
        .bind(next_run_at)
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record dispatch", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
