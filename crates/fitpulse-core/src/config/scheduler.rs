//! Due-reminder tick scheduler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the periodic due-reminder dispatch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the tick scheduler runs in this process. Disable for
    /// API-only deployments.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression driving the dispatch tick.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Maximum number of due reminders processed per tick.
    #[serde(default = "default_due_batch_limit")]
    pub due_batch_limit: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            cron: default_cron(),
            due_batch_limit: default_due_batch_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cron() -> String {
    // Second 0 of every minute.
    "0 * * * * *".to_string()
}

fn default_due_batch_limit() -> i64 {
    500
}
