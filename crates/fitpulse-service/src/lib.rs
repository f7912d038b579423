//! Business logic services for FitPulse.
//!
//! Services own the rules of the reminder domain: validation, schedule
//! computation, ownership checks, and notification delivery. They sit between
//! the HTTP layer and the persistence traits, and never touch SQL directly.
//!
//! Services use constructor injection: every dependency arrives at
//! construction time as an `Arc` reference to one of the storage traits
//! defined in `fitpulse-entity`.

pub mod context;
pub mod notification;
pub mod reminder;

pub use context::RequestContext;
pub use notification::NotificationService;
pub use reminder::{CreateReminderInput, ReminderService, UpdateReminderInput};
