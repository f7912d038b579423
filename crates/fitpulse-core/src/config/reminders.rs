//! Reminder domain defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied when a reminder is created without explicit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// UTC offset (`±HH:MM`) assumed for reminders that do not specify one.
    ///
    /// Reminders store a fixed offset rather than an IANA zone; this is the
    /// offset of the product's primary market.
    #[serde(default = "default_utc_offset")]
    pub default_utc_offset: String,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            default_utc_offset: default_utc_offset(),
        }
    }
}

fn default_utc_offset() -> String {
    "-05:00".to_string()
}
