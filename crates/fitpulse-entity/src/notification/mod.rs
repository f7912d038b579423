//! In-app notification domain entities.

pub mod model;
pub mod sink;
pub mod store;

pub use model::Notification;
pub use sink::{NotificationSink, REMINDER_TITLE};
pub use store::NotificationStore;
