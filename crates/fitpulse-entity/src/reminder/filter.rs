//! Owner-scoped reminder listing filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kind::ReminderKind;

/// Active/inactive filter for reminder listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Only reminders with `is_active = true`.
    Active,
    /// Only reminders with `is_active = false`.
    Inactive,
}

impl StatusFilter {
    /// The `is_active` value this filter selects.
    pub fn as_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = fitpulse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(fitpulse_core::AppError::validation(format!(
                "Invalid status filter: '{s}'. Expected 'active' or 'inactive'"
            ))),
        }
    }
}

/// Filters applied when listing a user's reminders.
///
/// Results are ordered by creation time, newest first. Soft-deleted
/// reminders are always excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderListFilter {
    /// Restrict to active or inactive reminders.
    pub status: Option<StatusFilter>,
    /// Restrict to a single kind.
    pub kind: Option<ReminderKind>,
    /// Maximum number of rows returned.
    pub limit: i64,
    /// Number of rows skipped before the first returned row.
    pub offset: i64,
}

impl Default for ReminderListFilter {
    fn default() -> Self {
        Self {
            status: None,
            kind: None,
            limit: 20,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("INACTIVE".parse::<StatusFilter>().unwrap(), StatusFilter::Inactive);
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_default_page_shape() {
        let filter = ReminderListFilter::default();
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.offset, 0);
        assert!(filter.status.is_none());
        assert!(filter.kind.is_none());
    }
}
