//! Booking domain module.
//!
//! The test-drive draft collected across turns, the confirmation text
//! rendered from it, and the record committed on confirmation.

#[allow(clippy::module_inception)]
mod booking;
mod confirmation;
mod draft;

pub use booking::{slot_start_hour, Booking};
pub use confirmation::{render_confirmation, ShowroomDetails, CONFIRM, REJECT};
pub use draft::{format_long_date, BookingDraft, TestDriveLocation};
