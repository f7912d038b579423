//! In-app notification service.

mod service;

pub use service::NotificationService;
