//! The accumulating, unconfirmed test-drive request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the test drive happens. Only one address variant can be held,
/// so a draft never carries both a home address and a drop location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TestDriveLocation {
    HomePickup { address: Option<String> },
    ShowroomPickup,
    Delivery { drop_location: Option<String> },
    Other { label: String },
}

impl TestDriveLocation {
    /// Classifies a location-mode answer.
    pub fn from_mode(mode: &str) -> Self {
        let lower = mode.trim().to_lowercase();
        if lower.contains("home pickup") {
            TestDriveLocation::HomePickup { address: None }
        } else if lower.contains("showroom pickup") {
            TestDriveLocation::ShowroomPickup
        } else if lower.contains("delivery") {
            TestDriveLocation::Delivery { drop_location: None }
        } else {
            TestDriveLocation::Other {
                label: mode.trim().to_string(),
            }
        }
    }

    /// Short mode name used when persisting a booking.
    pub fn mode_name(&self) -> &str {
        match self {
            TestDriveLocation::HomePickup { .. } => "home_pickup",
            TestDriveLocation::ShowroomPickup => "showroom_pickup",
            TestDriveLocation::Delivery { .. } => "delivery",
            TestDriveLocation::Other { .. } => "other",
        }
    }

    /// Customer-supplied address, if this mode takes one and it was given.
    pub fn address(&self) -> Option<&str> {
        match self {
            TestDriveLocation::HomePickup { address } => address.as_deref(),
            TestDriveLocation::Delivery { drop_location } => drop_location.as_deref(),
            _ => None,
        }
    }
}

/// Booking fields collected one turn at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Raw date answer: "Today", "Tomorrow", "Later this Week", ...
    pub date_choice: Option<String>,
    /// Named day picked after a non-immediate date answer.
    pub day: Option<String>,
    pub time_slot: Option<String>,
    pub actual_date: Option<NaiveDate>,
    pub formatted_date: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub license: Option<String>,
    pub location: Option<TestDriveLocation>,
}

impl BookingDraft {
    /// Records a concrete calendar date and its display form.
    pub fn set_actual_date(&mut self, date: NaiveDate) {
        self.actual_date = Some(date);
        self.formatted_date = Some(format_long_date(date));
    }

    /// Stores the address answer on whichever location mode asked for it.
    ///
    /// Returns false when the current mode takes no address.
    pub fn set_address(&mut self, answer: &str) -> bool {
        let answer = Some(answer.trim().to_string());
        match self.location.as_mut() {
            Some(TestDriveLocation::HomePickup { address }) => {
                *address = answer;
                true
            }
            Some(TestDriveLocation::Delivery { drop_location }) => {
                *drop_location = answer;
                true
            }
            _ => false,
        }
    }

    /// True when the license answer is affirmative.
    pub fn has_license(&self) -> bool {
        self.license
            .as_deref()
            .map(|answer| {
                let lower = answer.trim().to_lowercase();
                lower == "y" || lower.starts_with("yes") || lower.starts_with("yeah")
            })
            .unwrap_or(false)
    }
}

/// `Monday, 19 October 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
