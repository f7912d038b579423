//! Day-of-week bitmask for recurring reminders.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A 7-bit mask over the days of the week.
///
/// Bit *i* corresponds to the weekday with index *i*, where 0 = Sunday and
/// 6 = Saturday (the same layout [`Weekday::num_days_from_sunday`] uses).
/// Valid values are `0..=127`. The mask is stored and serialized as its raw
/// integer.
///
/// A reminder whose mask is absent (`Option<DayMask>` = `None`) fires on no
/// days at all, which is also how an explicit zero mask behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct DayMask(i16);

impl DayMask {
    /// The mask with no days enabled.
    pub const EMPTY: DayMask = DayMask(0);
    /// The mask with every day enabled.
    pub const ALL: DayMask = DayMask(0b111_1111);

    /// Build a mask from its raw bits, rejecting values outside `0..=127`.
    pub fn from_bits(bits: i16) -> Option<Self> {
        (0..=127).contains(&bits).then_some(Self(bits))
    }

    /// Build a mask enabling exactly the given weekdays.
    pub fn of(days: &[Weekday]) -> Self {
        let mut bits = 0i16;
        for day in days {
            bits |= 1 << day.num_days_from_sunday();
        }
        Self(bits)
    }

    /// Return the raw bits.
    pub fn bits(self) -> i16 {
        self.0
    }

    /// Whether the given weekday is enabled.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    /// Whether no day is enabled.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The first enabled weekday scanning from `start` inclusive, wrapping
    /// around the week; `None` when the mask is empty.
    pub fn next_enabled_from(self, start: Weekday) -> Option<Weekday> {
        let mut day = start;
        for _ in 0..7 {
            if self.contains(day) {
                return Some(day);
            }
            day = day.succ();
        }
        None
    }
}
