//! Reminder domain entities and scheduling logic.

pub mod day_mask;
pub mod filter;
pub mod kind;
pub mod model;
pub mod schedule;
pub mod store;

pub use day_mask::DayMask;
pub use filter::{ReminderListFilter, StatusFilter};
pub use kind::ReminderKind;
pub use model::Reminder;
pub use store::ReminderStore;
