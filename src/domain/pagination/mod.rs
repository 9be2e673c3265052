//! Result pagination.
//!
//! Pure slicing of a filtered result list into fixed-size pages and the
//! display units rendered for each page.

mod display;
mod paginator;

pub use display::{
    DisplayUnit, ImageAvailability, PageControl, BROWSE_MORE, CHANGE_CRITERIA, SELECT_TITLE,
};
pub use paginator::{compose, page, Page, PageView, DEFAULT_PAGE_SIZE};
