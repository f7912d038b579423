//! Background dispatch of due reminders.
//!
//! A cron tick fires once a minute, selects reminders whose `next_run_at`
//! has passed, delivers each one through the notification sink, and writes
//! the new schedule back with a conditional update so concurrent processes
//! never double-fire the same occurrence.

pub mod dispatcher;
pub mod scheduler;

pub use dispatcher::{CycleSummary, DueDispatcher};
pub use scheduler::TickScheduler;
