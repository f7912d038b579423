//! Shared value types used across FitPulse crates.

pub mod id;

pub use id::{NotificationId, ReminderId, UserId};
