//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use fitpulse_entity::reminder::ReminderKind;
use fitpulse_service::{CreateReminderInput, UpdateReminderInput};

/// Create reminder request body.
///
/// `scheduled_time` and `utc_offset` are format-checked by the service, so
/// their errors carry the same wording for HTTP and non-HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReminderRequest {
    /// Reminder kind.
    pub kind: ReminderKind,
    /// Message delivered to the owner.
    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: String,
    /// Wall-clock delivery time, `HH:MM` or `HH:MM:SS`.
    pub scheduled_time: String,
    /// Weekday bitmask, Sunday = bit 0.
    #[validate(range(min = 0, max = 127, message = "days_of_week must be between 0 and 127"))]
    pub days_of_week: Option<i16>,
    /// Whether the reminder repeats.
    #[serde(default)]
    pub is_recurring: bool,
    /// First date the reminder may fire (default: today in its offset).
    pub start_date: Option<NaiveDate>,
    /// Last date the reminder may fire, inclusive.
    pub end_date: Option<NaiveDate>,
    /// Fixed UTC offset, `±HH:MM`.
    pub utc_offset: Option<String>,
    /// Whether the reminder starts active (default: true).
    pub is_active: Option<bool>,
}

impl CreateReminderRequest {
    /// Converts to the service-level input.
    pub fn into_input(self) -> CreateReminderInput {
        CreateReminderInput {
            kind: self.kind,
            message: self.message,
            scheduled_time: self.scheduled_time,
            days_of_week: self.days_of_week,
            is_recurring: self.is_recurring,
            start_date: self.start_date,
            end_date: self.end_date,
            utc_offset: self.utc_offset,
            is_active: self.is_active,
        }
    }
}

/// Update reminder request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReminderRequest {
    /// Reminder kind.
    pub kind: Option<ReminderKind>,
    /// Message delivered to the owner.
    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: Option<String>,
    /// Wall-clock delivery time, `HH:MM` or `HH:MM:SS`.
    pub scheduled_time: Option<String>,
    /// Weekday bitmask, Sunday = bit 0.
    #[validate(range(min = 0, max = 127, message = "days_of_week must be between 0 and 127"))]
    pub days_of_week: Option<i16>,
    /// Whether the reminder repeats.
    pub is_recurring: Option<bool>,
    /// First date the reminder may fire.
    pub start_date: Option<NaiveDate>,
    /// Last date the reminder may fire. An explicit `null` clears it, an
    /// absent field leaves it unchanged.
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    /// Fixed UTC offset, `±HH:MM`.
    pub utc_offset: Option<String>,
    /// Whether the reminder is active.
    pub is_active: Option<bool>,
}

impl UpdateReminderRequest {
    /// Converts to the service-level input.
    pub fn into_input(self) -> UpdateReminderInput {
        UpdateReminderInput {
            kind: self.kind,
            message: self.message,
            scheduled_time: self.scheduled_time,
            days_of_week: self.days_of_week,
            is_recurring: self.is_recurring,
            start_date: self.start_date,
            end_date: self.end_date,
            utc_offset: self.utc_offset,
            is_active: self.is_active,
        }
    }
}

/// Toggle reminder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleReminderRequest {
    /// Target active state.
    pub active: bool,
}

/// Deserializes a field that distinguishes "absent" from "present but null":
/// absent stays `None` via the serde default, any present value (including
/// `null`) becomes `Some(...)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_absent_from_null_end_date() {
        let absent: UpdateReminderRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.end_date, None);

        let null: UpdateReminderRequest = serde_json::from_str(r#"{"end_date": null}"#).unwrap();
        assert_eq!(null.end_date, Some(None));

        let set: UpdateReminderRequest =
            serde_json::from_str(r#"{"end_date": "2025-03-01"}"#).unwrap();
        assert_eq!(
            set.end_date,
            Some(Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()))
        );
    }

    #[test]
    fn create_request_validation_bounds() {
        let valid = CreateReminderRequest {
            kind: ReminderKind::Water,
            message: "Drink".to_string(),
            scheduled_time: "08:00".to_string(),
            days_of_week: Some(127),
            is_recurring: true,
            start_date: None,
            end_date: None,
            utc_offset: None,
            is_active: None,
        };
        assert!(valid.validate().is_ok());

        let mut empty_message = valid.clone();
        empty_message.message = String::new();
        assert!(empty_message.validate().is_err());

        let mut bad_mask = valid;
        bad_mask.days_of_week = Some(128);
        assert!(bad_mask.validate().is_err());
    }
}
