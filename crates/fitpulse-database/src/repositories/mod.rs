//! Concrete Postgres implementations of the entity storage traits.

pub mod notification;
pub mod reminder;

pub use notification::PgNotificationStore;
pub use reminder::PgReminderStore;
