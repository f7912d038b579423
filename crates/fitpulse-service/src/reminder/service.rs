//! Reminder lifecycle operations.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::info;

use fitpulse_core::config::reminders::RemindersConfig;
use fitpulse_core::types::ReminderId;
use fitpulse_core::{AppError, AppResult};
use fitpulse_entity::notification::{NotificationSink, REMINDER_TITLE};
use fitpulse_entity::reminder::schedule;
use fitpulse_entity::reminder::{
    DayMask, Reminder, ReminderKind, ReminderListFilter, ReminderStore,
};

use crate::context::RequestContext;

/// How far a snooze pushes the next delivery.
const SNOOZE_MINUTES: i64 = 5;

/// Fields accepted when creating a reminder.
///
/// `scheduled_time` and `utc_offset` arrive as strings and are validated
/// here, so a bad payload is rejected before anything is persisted.
#[derive(Debug, Clone)]
pub struct CreateReminderInput {
    pub kind: ReminderKind,
    pub message: String,
    pub scheduled_time: String,
    pub days_of_week: Option<i16>,
    pub is_recurring: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub utc_offset: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update for a reminder. `None` fields are left unchanged.
///
/// `end_date` is doubly optional so callers can distinguish "leave as is"
/// (`None`) from "clear the end date" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct UpdateReminderInput {
    pub kind: Option<ReminderKind>,
    pub message: Option<String>,
    pub scheduled_time: Option<String>,
    pub days_of_week: Option<i16>,
    pub is_recurring: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub utc_offset: Option<String>,
    pub is_active: Option<bool>,
}

/// Service for creating and managing reminders.
#[derive(Clone)]
pub struct ReminderService {
    store: Arc<dyn ReminderStore>,
    sink: Arc<dyn NotificationSink>,
    defaults: RemindersConfig,
}

impl ReminderService {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        sink: Arc<dyn NotificationSink>,
        defaults: RemindersConfig,
    ) -> Self {
        Self {
            store,
            sink,
            defaults,
        }
    }

    /// Create a reminder and compute its first `next_run_at`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateReminderInput,
    ) -> AppResult<Reminder> {
        let scheduled_time = schedule::parse_time_of_day(&input.scheduled_time)?;
        let days_of_week = parse_day_mask(input.days_of_week)?;
        if input.is_recurring && days_of_week.is_none_or(|mask| mask.is_empty()) {
            return Err(AppError::validation(
                "days_of_week is required for recurring reminders",
            ));
        }

        let utc_offset = input
            .utc_offset
            .unwrap_or_else(|| self.defaults.default_utc_offset.clone());
        let offset = schedule::parse_utc_offset(&utc_offset)?;

        // Default the start date to "today" as the reminder's owner sees it.
        let start_date = input
            .start_date
            .unwrap_or_else(|| ctx.request_time.with_timezone(&offset).date_naive());

        let mut reminder = Reminder {
            id: ReminderId::new(),
            user_id: ctx.user_id,
            kind: input.kind,
            message: input.message,
            scheduled_time,
            days_of_week,
            is_recurring: input.is_recurring,
            is_active: input.is_active.unwrap_or(true),
            start_date,
            end_date: input.end_date,
            utc_offset,
            next_run_at: None,
            last_run_at: None,
            soft_deleted_at: None,
            created_at: ctx.request_time,
            updated_at: ctx.request_time,
        };
        reminder.next_run_at = schedule::first_run(&reminder, ctx.request_time)?;

        let stored = self.store.insert(&reminder).await?;
        info!(
            reminder_id = %stored.id,
            kind = %stored.kind,
            next_run_at = ?stored.next_run_at,
            "Created reminder"
        );
        Ok(stored)
    }

    /// List the caller's reminders, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ReminderListFilter,
    ) -> AppResult<Vec<Reminder>> {
        self.store.list_for_owner(ctx.user_id, filter).await
    }

    /// Fetch one reminder owned by the caller.
    ///
    /// Reminders owned by other users are indistinguishable from missing
    /// ones: both come back as `NotFound`.
    pub async fn get(&self, ctx: &RequestContext, id: ReminderId) -> AppResult<Reminder> {
        self.store
            .find_for_owner(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reminder not found"))
    }

    /// Apply a partial update and recompute `next_run_at` from scratch.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ReminderId,
        input: UpdateReminderInput,
    ) -> AppResult<Reminder> {
        let current = self.get(ctx, id).await?;
        let expected_updated_at = current.updated_at;

        let mut merged = current;
        if let Some(kind) = input.kind {
            merged.kind = kind;
        }
        if let Some(message) = input.message {
            merged.message = message;
        }
        if let Some(raw) = input.scheduled_time {
            merged.scheduled_time = schedule::parse_time_of_day(&raw)?;
        }
        if let Some(bits) = input.days_of_week {
            merged.days_of_week = parse_day_mask(Some(bits))?;
        }
        if let Some(is_recurring) = input.is_recurring {
            merged.is_recurring = is_recurring;
        }
        if let Some(start_date) = input.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            merged.end_date = end_date;
        }
        if let Some(raw) = input.utc_offset {
            schedule::parse_utc_offset(&raw)?;
            merged.utc_offset = raw;
        }
        if let Some(is_active) = input.is_active {
            merged.is_active = is_active;
        }

        if merged.is_recurring && merged.day_mask().is_empty() {
            return Err(AppError::validation(
                "days_of_week is required for recurring reminders",
            ));
        }

        merged.next_run_at = schedule::first_run(&merged, ctx.request_time)?;

        let stored = self.store.update(&merged, expected_updated_at).await?;
        info!(
            reminder_id = %stored.id,
            next_run_at = ?stored.next_run_at,
            "Updated reminder"
        );
        Ok(stored)
    }

    /// Flip a reminder on or off.
    ///
    /// Turning a reminder off clears its `next_run_at` so the dispatcher
    /// never sees it. Turning one back on leaves `next_run_at` empty; the
    /// reminder stays dormant until the next update or snooze recomputes it.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        id: ReminderId,
        active: bool,
    ) -> AppResult<Reminder> {
        let updated = self
            .store
            .set_active(id, ctx.user_id, active)
            .await?
            .ok_or_else(|| AppError::not_found("Reminder not found"))?;
        info!(reminder_id = %id, active, "Toggled reminder");
        Ok(updated)
    }

    /// Push the next delivery a few minutes out, reactivating if needed.
    pub async fn snooze(&self, ctx: &RequestContext, id: ReminderId) -> AppResult<Reminder> {
        let until = ctx.request_time + Duration::minutes(SNOOZE_MINUTES);
        let updated = self
            .store
            .snooze_until(id, ctx.user_id, until)
            .await?
            .ok_or_else(|| AppError::not_found("Reminder not found"))?;
        info!(reminder_id = %id, until = %until, "Snoozed reminder");
        Ok(updated)
    }

    /// Soft-delete a reminder. The row survives, but every read path and
    /// the dispatcher ignore it from now on.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: ReminderId) -> AppResult<()> {
        let deleted = self
            .store
            .soft_delete(id, ctx.user_id, ctx.request_time)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Reminder not found"));
        }
        info!(reminder_id = %id, "Deleted reminder");
        Ok(())
    }

    /// Deliver a reminder's message immediately, bypassing the schedule.
    pub async fn test_send(&self, ctx: &RequestContext, id: ReminderId) -> AppResult<()> {
        let reminder = self.get(ctx, id).await?;
        self.sink
            .deliver(reminder.user_id, REMINDER_TITLE, &reminder.message)
            .await?;
        info!(reminder_id = %id, "Sent test notification");
        Ok(())
    }
}

fn parse_day_mask(bits: Option<i16>) -> AppResult<Option<DayMask>> {
    bits.map(|b| {
        DayMask::from_bits(b).ok_or_else(|| {
            AppError::validation(format!("days_of_week must be between 0 and 127, got {b}"))
        })
    })
    .transpose()
}
