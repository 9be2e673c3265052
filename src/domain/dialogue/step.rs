//! Dialogue step tag.
//!
//! Persisted on the session; selects which handler the next message is
//! dispatched to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Entry point; prompts for the first missing criterion.
    #[default]
    BrowseStart,
    BrowseBudget,
    BrowseType,
    BrowseBrand,
    ShowMoreCars,
    CarSelectedOptions,
    TestDriveDate,
    TestDriveDay,
    TestDriveTime,
    TdName,
    TdPhone,
    TdLicense,
    TdLocationMode,
    TdHomeAddress,
    TdDropLocation,
    TestDriveConfirmation,
    BookingComplete,
    ChangeCriteriaConfirm,
    /// A persisted tag this build does not know.
    #[serde(other)]
    Unrecognized,
}

impl Step {
    /// Every step, including the unknown-tag fallback.
    #[cfg(test)]
    pub(crate) const ALL: [Step; 19] = [
        Step::BrowseStart,
        Step::BrowseBudget,
        Step::BrowseType,
        Step::BrowseBrand,
        Step::ShowMoreCars,
        Step::CarSelectedOptions,
        Step::TestDriveDate,
        Step::TestDriveDay,
        Step::TestDriveTime,
        Step::TdName,
        Step::TdPhone,
        Step::TdLicense,
        Step::TdLocationMode,
        Step::TdHomeAddress,
        Step::TdDropLocation,
        Step::TestDriveConfirmation,
        Step::BookingComplete,
        Step::ChangeCriteriaConfirm,
        Step::Unrecognized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::BrowseStart => "browse_start",
            Step::BrowseBudget => "browse_budget",
            Step::BrowseType => "browse_type",
            Step::BrowseBrand => "browse_brand",
            Step::ShowMoreCars => "show_more_cars",
            Step::CarSelectedOptions => "car_selected_options",
            Step::TestDriveDate => "test_drive_date",
            Step::TestDriveDay => "test_drive_day",
            Step::TestDriveTime => "test_drive_time",
            Step::TdName => "td_name",
            Step::TdPhone => "td_phone",
            Step::TdLicense => "td_license",
            Step::TdLocationMode => "td_location_mode",
            Step::TdHomeAddress => "td_home_address",
            Step::TdDropLocation => "td_drop_location",
            Step::TestDriveConfirmation => "test_drive_confirmation",
            Step::BookingComplete => "booking_complete",
            Step::ChangeCriteriaConfirm => "change_criteria_confirm",
            Step::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every step that can follow a criteria prompt: the next missing
/// criterion or the results page.
const CRITERIA_TARGETS: [Step; 4] = [
    Step::BrowseBudget,
    Step::BrowseType,
    Step::BrowseBrand,
    Step::ShowMoreCars,
];

impl StateMachine for Step {
    fn valid_transitions(&self) -> Vec<Self> {
        use Step::*;
        match self {
            BrowseStart | BrowseBudget | BrowseType | BrowseBrand => CRITERIA_TARGETS.to_vec(),
            ShowMoreCars => vec![ShowMoreCars, CarSelectedOptions, BrowseBudget, TestDriveDate],
            CarSelectedOptions => vec![CarSelectedOptions, TestDriveDate, BrowseBudget],
            TestDriveDate => vec![TestDriveTime, TestDriveDay],
            TestDriveDay => vec![TestDriveTime],
            TestDriveTime => vec![TdName],
            TdName => vec![TdPhone],
            TdPhone => vec![TdLicense],
            TdLicense => vec![TdLocationMode],
            TdLocationMode => vec![TdHomeAddress, TestDriveConfirmation],
            TdHomeAddress | TdDropLocation => vec![TestDriveConfirmation],
            TestDriveConfirmation => vec![TestDriveConfirmation, BookingComplete, BrowseBudget],
            BookingComplete => vec![BookingComplete, BrowseBudget],
            ChangeCriteriaConfirm => vec![ChangeCriteriaConfirm, BrowseBudget],
            Unrecognized => vec![BrowseStart],
        }
    }
}
