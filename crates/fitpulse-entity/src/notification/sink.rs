//! Delivery seam for reminder notifications.

use async_trait::async_trait;

use fitpulse_core::AppResult;
use fitpulse_core::types::UserId;

/// Title used for every reminder notification. Content templating is
/// deliberately out of scope; the reminder's own message is the body.
pub const REMINDER_TITLE: &str = "Reminder";

/// Delivers a rendered notification to a user.
///
/// The production implementation writes an in-app notification row; the
/// dispatcher and the test-send path do not care how delivery happens, only
/// whether it succeeded. Failures carry `ErrorKind::Delivery` so the
/// dispatcher can leave the reminder due for the next tick.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Deliver a notification with the given title and body.
    async fn deliver(&self, user_id: UserId, title: &str, body: &str) -> AppResult<()>;
}
