//! Calendar Adapters
//!
//! Implementations of the Calendar port.

mod system_calendar;

pub use system_calendar::{day_label, SystemCalendar, TIME_SLOTS};
