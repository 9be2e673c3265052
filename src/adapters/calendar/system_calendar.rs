//! System Calendar - Test-drive dates relative to the showroom's today.
//!
//! Dates are computed in Indian Standard Time (UTC+05:30). Tests pin
//! "today" with [`SystemCalendar::fixed`].

use chrono::{Datelike, Days, FixedOffset, NaiveDate, Utc, Weekday};

use crate::domain::dialogue::vocabulary::{LATER_THIS_WEEK, NEXT_WEEK, TODAY, TOMORROW};
use crate::ports::Calendar;

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
/// Days offered after a free-form date answer.
const DEFAULT_DAY_COUNT: u64 = 5;
/// Furthest ahead a day label is looked up.
const LOOKAHEAD_DAYS: u64 = 21;

pub const TIME_SLOTS: [&str; 3] = [
    "Morning (10 AM - 12 PM)",
    "Afternoon (12 PM - 3 PM)",
    "Evening (3 PM - 6 PM)",
];

/// Calendar backed by the system clock, or a pinned date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar {
    fixed_today: Option<NaiveDate>,
}

impl SystemCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar whose "today" never moves.
    pub fn fixed(today: NaiveDate) -> Self {
        Self {
            fixed_today: Some(today),
        }
    }

    pub fn today(&self) -> NaiveDate {
        if let Some(today) = self.fixed_today {
            return today;
        }
        match FixedOffset::east_opt(IST_OFFSET_SECS) {
            Some(ist) => Utc::now().with_timezone(&ist).date_naive(),
            None => Utc::now().date_naive(),
        }
    }

    fn plus(&self, days: u64) -> Option<NaiveDate> {
        self.today().checked_add_days(Days::new(days))
    }

    /// Dates offered for a date answer, in order.
    fn candidate_days(&self, from_selection: &str) -> Vec<NaiveDate> {
        let today = self.today();
        let weekday = u64::from(today.weekday().num_days_from_monday());
        let selection = from_selection.trim();

        let range: Vec<u64> = if selection.eq_ignore_ascii_case(LATER_THIS_WEEK) {
            // Day after tomorrow through Sunday.
            let until_sunday = 6 - weekday;
            if until_sunday >= 2 {
                (2..=until_sunday).collect()
            } else {
                (2..2 + 3).collect()
            }
        } else if selection.eq_ignore_ascii_case(NEXT_WEEK) {
            // Monday through Saturday of next week.
            let to_monday = 7 - weekday;
            (to_monday..to_monday + 6).collect()
        } else {
            (1..=DEFAULT_DAY_COUNT).collect()
        };

        range.into_iter().filter_map(|d| self.plus(d)).collect()
    }
}

/// `Wednesday, 21 Oct`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %-d %b").to_string()
}

fn parse_weekday(text: &str) -> Option<Weekday> {
    let word = text
        .split(|c: char| !c.is_alphabetic())
        .find(|w| !w.is_empty())?;
    word.parse::<Weekday>().ok()
}

impl Calendar for SystemCalendar {
    fn resolve_date(&self, selection: &str) -> Option<NaiveDate> {
        let selection = selection.trim();
        if selection.eq_ignore_ascii_case(TODAY) {
            Some(self.today())
        } else if selection.eq_ignore_ascii_case(TOMORROW) {
            self.plus(1)
        } else {
            None
        }
    }

    fn resolve_day(&self, day_label_text: &str, earlier_selection: Option<&str>) -> Option<NaiveDate> {
        let wanted = day_label_text.trim();

        let offered = self.candidate_days(earlier_selection.unwrap_or_default());
        if let Some(date) = offered
            .iter()
            .find(|d| day_label(**d).eq_ignore_ascii_case(wanted))
        {
            return Some(*date);
        }

        let weekday = parse_weekday(wanted)?;
        offered
            .into_iter()
            .find(|d| d.weekday() == weekday)
            .or_else(|| {
                (1..=LOOKAHEAD_DAYS)
                    .filter_map(|d| self.plus(d))
                    .find(|d| d.weekday() == weekday)
            })
    }

    fn day_options(&self, from_selection: &str) -> Vec<String> {
        self.candidate_days(from_selection)
            .into_iter()
            .map(day_label)
            .collect()
    }

    fn time_slot_options(&self) -> Vec<String> {
        TIME_SLOTS.iter().map(|s| s.to_string()).collect()
    }
}
