//! Next-run computation for reminders.
//!
//! Two entry points share one bounded day-by-day scan: [`first_run`] anchors
//! at the reminder's start date and is used at create/update time, while
//! [`next_run_after_fire`] starts strictly after "now" and is used by the
//! dispatcher once a reminder has fired. Both take "now" as an explicit
//! parameter so callers and tests control the clock.
//!
//! All wall-clock arithmetic uses the reminder's fixed UTC offset. That is a
//! deliberate simplification: offsets do not follow daylight-saving
//! transitions the way a full IANA zone would.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use fitpulse_core::{AppError, AppResult};

use super::model::Reminder;

/// Upper bound on the day-by-day scan: one leap year plus margin. This
/// guarantees termination even for a fully-specified year-long window or a
/// malformed all-zero mask that slipped past validation.
pub const SCAN_HORIZON_DAYS: i64 = 370;

/// Parse a wall-clock time of day, accepting `HH:MM` and `HH:MM:SS`.
pub fn parse_time_of_day(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| {
            AppError::validation(format!(
                "Invalid scheduled_time '{raw}': expected HH:MM or HH:MM:SS"
            ))
        })
}

/// Parse a fixed UTC offset of the form `±HH:MM`.
pub fn parse_utc_offset(raw: &str) -> AppResult<FixedOffset> {
    raw.parse::<FixedOffset>()
        .map_err(|_| AppError::validation(format!("Invalid utc_offset '{raw}': expected ±HH:MM")))
}

/// The absolute instant of `time` on `date` in the given offset.
fn instant_at(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    // Subtracting the offset converts local wall time to naive UTC.
    Utc.from_utc_datetime(&(date.and_time(time) - offset))
}

/// Compute the initial `next_run_at` for a reminder at create/update time.
///
/// Inactive reminders never schedule. A one-off reminder anchors at
/// `start_date` + `scheduled_time`; an anchor already in the past stays
/// unscheduled, because a lapsed one-off is not re-armed (the caller must
/// snooze or update it). A recurring reminder scans day by day from `now`'s
/// calendar date in the reminder's offset for the first enabled weekday
/// inside [`start_date`, `end_date`] whose instant is strictly after `now`.
pub fn first_run(reminder: &Reminder, now: DateTime<Utc>) -> AppResult<Option<DateTime<Utc>>> {
    if !reminder.is_active {
        return Ok(None);
    }
    let offset = parse_utc_offset(&reminder.utc_offset)?;

    if !reminder.is_recurring {
        if reminder.end_date.is_some_and(|end| reminder.start_date > end) {
            return Ok(None);
        }
        let anchor = instant_at(reminder.start_date, reminder.scheduled_time, offset);
        return Ok((anchor > now).then_some(anchor));
    }

    let mask = reminder.day_mask();
    // Anchoring on now's date in the reminder's offset cannot skip a
    // candidate: any instant after `now` falls on that date or later there.
    let today = now.with_timezone(&offset).date_naive();
    for i in 0..SCAN_HORIZON_DAYS {
        let date = today + Duration::days(i);
        if !mask.contains(date.weekday()) {
            continue;
        }
        if date < reminder.start_date {
            continue;
        }
        if reminder.end_date.is_some_and(|end| date > end) {
            continue;
        }
        let candidate = instant_at(date, reminder.scheduled_time, offset);
        if candidate > now {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Compute the `next_run_at` that replaces a just-fired occurrence.
///
/// One-off reminders never re-arm after firing. The scan starts the day
/// *after* `now` in the reminder's offset, so a recurring reminder can never
/// fire twice on the same calendar date; the first enabled weekday past
/// `end_date` ends the scan with no result.
pub fn next_run_after_fire(
    reminder: &Reminder,
    now: DateTime<Utc>,
) -> AppResult<Option<DateTime<Utc>>> {
    if !reminder.is_recurring {
        return Ok(None);
    }
    let offset = parse_utc_offset(&reminder.utc_offset)?;
    let mask = reminder.day_mask();
    let tomorrow = now.with_timezone(&offset).date_naive() + Duration::days(1);
    for i in 0..SCAN_HORIZON_DAYS {
        let date = tomorrow + Duration::days(i);
        if !mask.contains(date.weekday()) {
            continue;
        }
        if reminder.end_date.is_some_and(|end| date > end) {
            return Ok(None);
        }
        if date < reminder.start_date {
            continue;
        }
        return Ok(Some(instant_at(date, reminder.scheduled_time, offset)));
    }
    Ok(None)
}
