//! Fixed-size paging over a filtered result list.

use std::collections::HashMap;

use crate::domain::browse::CarListing;

use super::display::{DisplayUnit, ImageAvailability, PageControl};

/// Listings shown per turn.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// One slice of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [CarListing],
    /// Index of the first item in the full list.
    pub start: usize,
    /// Cursor for the following page; equals `start + items.len()`.
    pub next_index: usize,
    pub total: usize,
    pub has_more: bool,
}

impl<'a> Page<'a> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Trailing control for this page.
    pub fn control(&self) -> PageControl {
        if self.has_more {
            PageControl::BrowseMore
        } else {
            PageControl::ChangeCriteria
        }
    }
}

/// Slices `cars` starting at `car_index`. Pure; an index past the end yields
/// an empty page rather than panicking.
pub fn page(cars: &[CarListing], car_index: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let start = car_index.min(cars.len());
    let end = start.saturating_add(page_size).min(cars.len());

    Page {
        items: &cars[start..end],
        start,
        next_index: end,
        total: cars.len(),
        has_more: end < cars.len(),
    }
}

/// Rendered page: header text, per-item units and the trailing control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub message: String,
    pub units: Vec<DisplayUnit>,
    pub control: PageControl,
}

/// Builds the display units for a page.
///
/// Each item gets exactly one summary unit (image when a public link is
/// known, text otherwise) followed by its select control.
pub fn compose(page: &Page<'_>, images: &HashMap<String, ImageAvailability>) -> PageView {
    if page.is_empty() {
        return PageView {
            message: "No more cars to display.".to_string(),
            units: Vec::new(),
            control: PageControl::ChangeCriteria,
        };
    }

    let mut units = Vec::with_capacity(page.items.len() * 2);
    for car in page.items {
        let availability = images
            .get(&car.registration_number)
            .unwrap_or(&ImageAvailability::Missing);
        units.push(DisplayUnit::summary(car.caption(), availability));
        units.push(DisplayUnit::select(car.select_token()));
    }

    let mut message = format!(
        "Showing cars {}-{} of {}:",
        page.start + 1,
        page.next_index,
        page.total
    );
    if !page.has_more {
        message.push_str("\n\nNo more cars available.");
    }

    PageView {
        message,
        units,
        control: page.control(),
    }
}
