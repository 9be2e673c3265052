//! Calendar Port - Turns date and day answers into concrete dates.

use chrono::NaiveDate;

/// Port for test-drive date and time-slot computation
pub trait Calendar: Send + Sync {
    /// Concrete date for an immediate choice ("Today", "Tomorrow"), or
    /// `None` when the choice needs a follow-up day pick.
    fn resolve_date(&self, selection: &str) -> Option<NaiveDate>;

    /// Concrete date for a day label offered by [`Calendar::day_options`].
    fn resolve_day(&self, day_label: &str, earlier_selection: Option<&str>) -> Option<NaiveDate>;

    /// Day labels offered after a non-immediate date choice.
    fn day_options(&self, from_selection: &str) -> Vec<String>;

    /// Time slots offered once a date is known.
    fn time_slot_options(&self) -> Vec<String>;
}
