//! Reminder kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories of reminders the app supports.
///
/// The kind is a payload-agnostic tag used for filtering and client-side
/// display; scheduling behaves identically for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reminder_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    /// Training session reminder.
    Workout,
    /// Hydration reminder.
    Water,
    /// Meal or supplement reminder.
    Nutrition,
    /// Free-form user-defined reminder.
    Custom,
}

impl ReminderKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Water => "water",
            Self::Nutrition => "nutrition",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = fitpulse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workout" => Ok(Self::Workout),
            "water" => Ok(Self::Water),
            "nutrition" => Ok(Self::Nutrition),
            "custom" => Ok(Self::Custom),
            _ => Err(fitpulse_core::AppError::validation(format!(
                "Invalid reminder kind: '{s}'. Expected one of: workout, water, nutrition, custom"
            ))),
        }
    }
}
