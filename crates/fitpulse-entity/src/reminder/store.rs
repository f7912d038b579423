//! Storage seam for reminders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use fitpulse_core::AppResult;
use fitpulse_core::types::{ReminderId, UserId};

use super::filter::ReminderListFilter;
use super::model::Reminder;

/// Persistence operations for reminders.
///
/// Implemented by the Postgres repository in production and by an in-memory
/// double in tests; the service and dispatcher only ever see this trait.
/// Owner-scoped lookups treat missing, foreign-owned, and soft-deleted rows
/// identically (they simply return nothing), so callers cannot distinguish
/// them.
#[async_trait]
pub trait ReminderStore: Send + Sync + 'static {
    /// Persist a new reminder and return the stored row.
    async fn insert(&self, reminder: &Reminder) -> AppResult<Reminder>;

    /// Fetch one reminder by id, scoped to its owner.
    async fn find_for_owner(
        &self,
        id: ReminderId,
        owner: UserId,
    ) -> AppResult<Option<Reminder>>;

    /// List a user's reminders, newest first.
    async fn list_for_owner(
        &self,
        owner: UserId,
        filter: &ReminderListFilter,
    ) -> AppResult<Vec<Reminder>>;

    /// Fetch active, non-deleted reminders with `next_run_at <= now`,
    /// ordered by `next_run_at` ascending, at most `limit` rows.
    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Reminder>>;

    /// Persist a fully merged reminder row.
    ///
    /// The write is conditional on the stored `updated_at` still matching
    /// `expected_updated_at`; a concurrent modification surfaces as a
    /// `Conflict` error instead of a lost update.
    async fn update(
        &self,
        reminder: &Reminder,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<Reminder>;

    /// Set `is_active` in a single row write; deactivating also clears
    /// `next_run_at`. Returns the updated row, or `None` when the reminder
    /// does not exist for this owner.
    async fn set_active(
        &self,
        id: ReminderId,
        owner: UserId,
        active: bool,
    ) -> AppResult<Option<Reminder>>;

    /// Override `next_run_at` to the given instant and force the reminder
    /// active, in a single row write.
    async fn snooze_until(
        &self,
        id: ReminderId,
        owner: UserId,
        until: DateTime<Utc>,
    ) -> AppResult<Option<Reminder>>;

    /// Logically delete: stamp `soft_deleted_at`, deactivate, clear
    /// `next_run_at`. Returns whether a row was affected.
    async fn soft_delete(
        &self,
        id: ReminderId,
        owner: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Commit the dispatcher's post-fire bookkeeping: `last_run_at`,
    /// the new `next_run_at`, and `is_active`, conditional on `next_run_at`
    /// still holding the value the due batch selected.
    ///
    /// Returns `false` when the row was concurrently modified (or
    /// deactivated/deleted) since selection; the dispatcher then leaves it
    /// alone.
    async fn record_dispatch(
        &self,
        id: ReminderId,
        expected_next_run_at: DateTime<Utc>,
        last_run_at: DateTime<Utc>,
        next_run_at: Option<DateTime<Utc>>,
        active: bool,
    ) -> AppResult<bool>;
}
