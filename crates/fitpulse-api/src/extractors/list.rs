//! Reminder list query parameter extractor.

use serde::{Deserialize, Serialize};

use fitpulse_entity::reminder::{ReminderKind, ReminderListFilter, StatusFilter};

/// Query parameters for listing reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Filter by active state: "active" or "inactive".
    pub status: Option<StatusFilter>,
    /// Filter by reminder kind.
    pub kind: Option<ReminderKind>,
    /// Maximum rows returned (default: 20, max: 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Rows skipped before the first result (default: 0).
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl ListParams {
    /// Converts to a store-level filter with bounds applied.
    pub fn into_filter(self) -> ReminderListFilter {
        ReminderListFilter {
            status: self.status,
            kind: self.kind,
            limit: self.limit.clamp(1, 100),
            offset: self.offset.max(0),
        }
    }
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxParams {
    /// Maximum rows returned (default: 50, max: 200).
    #[serde(default = "default_inbox_limit")]
    pub limit: i64,
}

fn default_inbox_limit() -> i64 {
    50
}

impl InboxParams {
    /// The requested limit with bounds applied.
    pub fn capped_limit(&self) -> i64 {
        self.limit.clamp(1, 200)
    }
}
