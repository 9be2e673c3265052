//! Confirmed test-drive booking record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, ConversationKey, Timestamp, ValidationError};

use super::draft::{BookingDraft, TestDriveLocation};

/// Hour a time slot starts at, from its leading word.
pub fn slot_start_hour(slot: &str) -> Option<u32> {
    let lower = slot.to_lowercase();
    if lower.contains("morning") {
        Some(10)
    } else if lower.contains("afternoon") {
        Some(13)
    } else if lower.contains("evening") {
        Some(16)
    } else {
        None
    }
}

/// A test drive the customer confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub conversation: ConversationKey,
    pub car: String,
    /// Local showroom time; `None` when no concrete date was resolved.
    pub scheduled_at: Option<NaiveDateTime>,
    pub time_slot: Option<String>,
    pub name: String,
    pub phone: String,
    pub has_license: bool,
    pub location: Option<TestDriveLocation>,
    pub created_at: Timestamp,
}

impl Booking {
    /// Freezes a draft into a booking record.
    ///
    /// A booking needs a car and a way to reach the customer; drafts
    /// without a selected car, a name or a phone number are rejected.
    pub fn from_draft(
        conversation: ConversationKey,
        selected_car: Option<&str>,
        draft: &BookingDraft,
    ) -> Result<Self, ValidationError> {
        let car = required("selected_car", selected_car)?;
        let name = required("name", draft.name.as_deref())?;
        let phone = required("phone", draft.phone.as_deref())?;

        let scheduled_at = draft.actual_date.and_then(|date| {
            let hour = draft
                .time_slot
                .as_deref()
                .and_then(slot_start_hour)
                .unwrap_or(10);
            date.and_hms_opt(hour, 0, 0)
        });

        Ok(Self {
            id: BookingId::new(),
            conversation,
            car,
            scheduled_at,
            time_slot: draft.time_slot.clone(),
            name,
            phone,
            has_license: draft.has_license(),
            location: draft.location.clone(),
            created_at: Timestamp::now(),
        })
    }
}

fn required(field: &str, value: Option<&str>) -> Result<String, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::empty_field(field))
}
