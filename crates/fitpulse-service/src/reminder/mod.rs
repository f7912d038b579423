//! Reminder lifecycle service.

mod service;

pub use service::{CreateReminderInput, ReminderService, UpdateReminderInput};
