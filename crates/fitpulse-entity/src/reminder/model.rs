//! Reminder entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitpulse_core::types::{ReminderId, UserId};

use super::day_mask::DayMask;
use super::kind::ReminderKind;

/// A scheduled reminder owned by a single user.
///
/// `scheduled_time` is a wall-clock time of day in the reminder's own
/// `utc_offset`, not an absolute instant. `next_run_at` is the absolute
/// instant of the next firing and is the only field the dispatcher consults
/// for due-ness; it is kept consistent with the schedule fields at every
/// write (an inactive reminder always has `next_run_at = None`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    /// Unique reminder identifier.
    pub id: ReminderId,
    /// The owning user. Every operation is scoped to this owner.
    pub user_id: UserId,
    /// Reminder category tag.
    pub kind: ReminderKind,
    /// Free text delivered when the reminder fires.
    pub message: String,
    /// Wall-clock time of day the reminder fires at.
    pub scheduled_time: NaiveTime,
    /// Enabled weekdays for recurring reminders; meaningless when one-off.
    pub days_of_week: Option<DayMask>,
    /// Whether the reminder repeats on its enabled weekdays.
    pub is_recurring: bool,
    /// Whether the reminder participates in scheduling at all.
    pub is_active: bool,
    /// First calendar date the reminder is valid on (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar date the reminder is valid on (inclusive); open-ended
    /// when absent.
    pub end_date: Option<NaiveDate>,
    /// Fixed UTC offset (`±HH:MM`) anchoring `scheduled_time` to instants.
    pub utc_offset: String,
    /// Absolute instant of the next scheduled firing.
    pub next_run_at: Option<DateTime<Utc>>,
    /// Absolute instant of the most recent firing; advisory only.
    pub last_run_at: Option<DateTime<Utc>>,
    /// When the reminder was logically deleted.
    pub soft_deleted_at: Option<DateTime<Utc>>,
    /// When the reminder was created.
    pub created_at: DateTime<Utc>,
    /// When the reminder was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// The weekday mask, treating an absent mask as "no days enabled".
    pub fn day_mask(&self) -> DayMask {
        self.days_of_week.unwrap_or(DayMask::EMPTY)
    }
}
