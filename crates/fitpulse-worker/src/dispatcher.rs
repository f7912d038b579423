//! Due-reminder selection, delivery, and rescheduling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use fitpulse_core::AppResult;
use fitpulse_entity::notification::{NotificationSink, REMINDER_TITLE};
use fitpulse_entity::reminder::schedule;
use fitpulse_entity::reminder::{Reminder, ReminderStore};

/// Outcome counts for one dispatch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Reminders selected as due this tick.
    pub selected: usize,
    /// Reminders delivered and committed.
    pub fired: usize,
    /// Reminders whose delivery failed. Their rows are untouched, so they
    /// come back next tick.
    pub failed: usize,
    /// Reminders whose bookkeeping write lost to a concurrent writer.
    pub skipped: usize,
}

/// Selects due reminders, delivers them, and advances their schedules.
///
/// Each reminder is processed in isolation. One failure never blocks the
/// rest of the batch, and a cycle-level error is only possible if the due
/// query itself fails.
pub struct DueDispatcher {
    store: Arc<dyn ReminderStore>,
    sink: Arc<dyn NotificationSink>,
    batch_limit: i64,
}

impl DueDispatcher {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        sink: Arc<dyn NotificationSink>,
        batch_limit: i64,
    ) -> Self {
        Self {
            store,
            sink,
            batch_limit,
        }
    }

    /// Run one dispatch cycle against the current clock.
    pub async fn run_due_cycle(&self) -> AppResult<CycleSummary> {
        self.run_due_cycle_at(Utc::now()).await
    }

    /// Run one dispatch cycle treating `now` as the current instant.
    pub async fn run_due_cycle_at(&self, now: DateTime<Utc>) -> AppResult<CycleSummary> {
        let due = self.store.find_due(now, self.batch_limit).await?;
        let mut summary = CycleSummary {
            selected: due.len(),
            ..CycleSummary::default()
        };

        for reminder in &due {
            match self.fire_and_reschedule(reminder, now).await {
                Ok(true) => summary.fired += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    warn!(
                        reminder_id = %reminder.id,
                        error = %e,
                        "Reminder dispatch failed; will retry next cycle"
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Deliver one reminder and commit its new schedule.
    ///
    /// Delivery comes first: if it fails the row is left untouched and the
    /// reminder stays due, trading a possible duplicate next tick for never
    /// silently dropping an occurrence. The commit is conditional on the
    /// `next_run_at` we selected, so a concurrent update or second
    /// dispatcher invalidates it instead of double-advancing the schedule.
    async fn fire_and_reschedule(
        &self,
        reminder: &Reminder,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        // Due rows always carry a next_run_at; a missing one means the row
        // was already handled.
        let Some(expected_next_run_at) = reminder.next_run_at else {
            return Ok(false);
        };

        self.sink
            .deliver(reminder.user_id, REMINDER_TITLE, &reminder.message)
            .await?;

        let next_run_at = match schedule::next_run_after_fire(reminder, now) {
            Ok(next) => next,
            Err(e) => {
                // An unparsable offset would fail again every cycle after
                // delivering. Deactivating stops the repeat.
                warn!(
                    reminder_id = %reminder.id,
                    error = %e,
                    "Could not compute next run; deactivating reminder"
                );
                None
            }
        };
        let active = reminder.is_recurring && next_run_at.is_some();

        let committed = self
            .store
            .record_dispatch(reminder.id, expected_next_run_at, now, next_run_at, active)
            .await?;
        if committed {
            debug!(
                reminder_id = %reminder.id,
                next_run_at = ?next_run_at,
                active,
                "Dispatched reminder"
            );
        } else {
            debug!(
                reminder_id = %reminder.id,
                "Dispatch commit lost to a concurrent writer; skipping"
            );
        }
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveTime, TimeZone};

    use fitpulse_core::types::{ReminderId, UserId};
    use fitpulse_entity::reminder::{DayMask, ReminderKind};
    use fitpulse_entity::testing::{MemoryReminderStore, RecordingSink};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    /// Daily 08:00 reminder at -05:00, armed for Wednesday 2025-01-08.
    fn due_reminder(user: UserId, message: &str) -> Reminder {
        Reminder {
            id: ReminderId::new(),
            user_id: user,
            kind: ReminderKind::Water,
            message: message.to_string(),
            scheduled_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            days_of_week: Some(DayMask::ALL),
            is_recurring: true,
            is_active: true,
            start_date: date(2025, 1, 1),
            end_date: None,
            utc_offset: "-05:00".to_string(),
            next_run_at: Some(utc(2025, 1, 8, 13, 0)),
            last_run_at: None,
            soft_deleted_at: None,
            created_at: utc(2025, 1, 1, 0, 0),
            updated_at: utc(2025, 1, 1, 0, 0),
        }
    }

    fn dispatcher(
        batch_limit: i64,
    ) -> (DueDispatcher, Arc<MemoryReminderStore>, Arc<RecordingSink>) {
        let store = Arc::new(MemoryReminderStore::new());
        let sink = Arc::new(RecordingSink::new());
        let dispatcher = DueDispatcher::new(store.clone(), sink.clone(), batch_limit);
        (dispatcher, store, sink)
    }

    #[tokio::test]
    async fn fires_due_reminder_and_reschedules_next_day() {
        let (dispatcher, store, sink) = dispatcher(500);
        let reminder = due_reminder(UserId::new(), "Drink water");
        store.insert(&reminder).await.unwrap();

        let now = utc(2025, 1, 8, 13, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.selected, 1);
        assert_eq!(summary.fired, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);

        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].title, REMINDER_TITLE);
        assert_eq!(deliveries[0].body, "Drink water");

        let row = store.snapshot(reminder.id).unwrap();
        assert_eq!(row.last_run_at, Some(now));
        // Thursday 08:00 local.
        assert_eq!(row.next_run_at, Some(utc(2025, 1, 9, 13, 0)));
        assert!(row.is_active);
    }

    #[tokio::test]
    async fn one_off_deactivates_after_firing() {
        let (dispatcher, store, sink) = dispatcher(500);
        let mut reminder = due_reminder(UserId::new(), "Race day");
        reminder.is_recurring = false;
        reminder.days_of_week = None;
        store.insert(&reminder).await.unwrap();

        let now = utc(2025, 1, 8, 13, 5);
        dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(sink.deliveries().len(), 1);
        let row = store.snapshot(reminder.id).unwrap();
        assert!(!row.is_active);
        assert_eq!(row.next_run_at, None);
        assert_eq!(row.last_run_at, Some(now));
    }

    #[tokio::test]
    async fn end_date_expiry_delivers_then_deactivates() {
        let (dispatcher, store, sink) = dispatcher(500);
        let mut reminder = due_reminder(UserId::new(), "Last session");
        reminder.end_date = Some(date(2025, 1, 8));
        store.insert(&reminder).await.unwrap();

        // The final occurrence inside the window still fires.
        let now = utc(2025, 1, 8, 13, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.fired, 1);
        assert_eq!(sink.deliveries().len(), 1);

        let row = store.snapshot(reminder.id).unwrap();
        assert!(!row.is_active);
        assert_eq!(row.next_run_at, None);
        assert_eq!(row.last_run_at, Some(now));
    }

    #[tokio::test]
    async fn delivery_failure_leaves_row_due_and_others_unaffected() {
        let (dispatcher, store, sink) = dispatcher(500);
        let flaky_user = UserId::new();
        sink.fail_deliveries_to(flaky_user);

        let healthy_a = due_reminder(UserId::new(), "A");
        let flaky = due_reminder(flaky_user, "B");
        let healthy_c = due_reminder(UserId::new(), "C");
        store.insert(&healthy_a).await.unwrap();
        store.insert(&flaky).await.unwrap();
        store.insert(&healthy_c).await.unwrap();

        let now = utc(2025, 1, 8, 13, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.selected, 3);
        assert_eq!(summary.fired, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(sink.deliveries().len(), 2);

        // The failed row keeps its schedule so the next tick retries it.
        let row = store.snapshot(flaky.id).unwrap();
        assert_eq!(row.next_run_at, flaky.next_run_at);
        assert_eq!(row.last_run_at, None);
        assert!(row.is_active);

        let advanced = store.snapshot(healthy_a.id).unwrap();
        assert_eq!(advanced.last_run_at, Some(now));
    }

    #[tokio::test]
    async fn lost_conditional_write_counts_as_skipped() {
        let (dispatcher, store, sink) = dispatcher(500);
        store.force_dispatch_conflict();
        let reminder = due_reminder(UserId::new(), "Contended");
        store.insert(&reminder).await.unwrap();

        let now = utc(2025, 1, 8, 13, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.selected, 1);
        assert_eq!(summary.fired, 0);
        assert_eq!(summary.skipped, 1);
        // Delivery happened before the commit was lost; the schedule is
        // whatever the concurrent writer made it.
        assert_eq!(sink.deliveries().len(), 1);
        let row = store.snapshot(reminder.id).unwrap();
        assert_eq!(row.last_run_at, None);
    }

    #[tokio::test]
    async fn batch_limit_caps_selection() {
        let (dispatcher, store, _) = dispatcher(1);
        let early = due_reminder(UserId::new(), "Early");
        let mut late = due_reminder(UserId::new(), "Late");
        late.next_run_at = Some(utc(2025, 1, 8, 13, 30));
        store.insert(&early).await.unwrap();
        store.insert(&late).await.unwrap();

        let now = utc(2025, 1, 8, 14, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.selected, 1);
        assert_eq!(summary.fired, 1);
        // Oldest next_run_at goes first; the other row waits for the next
        // cycle.
        assert!(store.snapshot(early.id).unwrap().last_run_at.is_some());
        assert!(store.snapshot(late.id).unwrap().last_run_at.is_none());
    }

    #[tokio::test]
    async fn future_and_inactive_reminders_are_not_selected() {
        let (dispatcher, store, sink) = dispatcher(500);
        let mut future = due_reminder(UserId::new(), "Not yet");
        future.next_run_at = Some(utc(2025, 1, 8, 13, 1));
        let mut dormant = due_reminder(UserId::new(), "Off");
        dormant.is_active = false;
        dormant.next_run_at = None;
        store.insert(&future).await.unwrap();
        store.insert(&dormant).await.unwrap();

        let summary = dispatcher
            .run_due_cycle_at(utc(2025, 1, 8, 13, 0))
            .await
            .unwrap();

        assert_eq!(summary.selected, 0);
        assert!(sink.deliveries().is_empty());
    }

    #[tokio::test]
    async fn malformed_offset_delivers_then_deactivates() {
        let (dispatcher, store, sink) = dispatcher(500);
        let mut reminder = due_reminder(UserId::new(), "Corrupt row");
        reminder.utc_offset = "somewhere".to_string();
        store.insert(&reminder).await.unwrap();

        let now = utc(2025, 1, 8, 13, 0);
        let summary = dispatcher.run_due_cycle_at(now).await.unwrap();

        assert_eq!(summary.fired, 1);
        assert_eq!(sink.deliveries().len(), 1);
        let row = store.snapshot(reminder.id).unwrap();
        assert!(!row.is_active);
        assert_eq!(row.next_run_at, None);
    }
}
