//! Inventory listings as seen by the dialogue.

use serde::{Deserialize, Serialize};

use super::money::format_rupees;

/// Prefix of the per-listing select token.
pub const SELECT_TOKEN_PREFIX: &str = "book_";

/// One used car in stock. Read-only to the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarListing {
    pub brand: String,
    pub model: String,
    pub variant: String,
    pub year: i32,
    pub fuel_type: String,
    /// Asking price in rupees.
    pub price: u64,
    pub registration_number: String,
    #[serde(rename = "type")]
    pub car_type: String,
}

impl CarListing {
    /// `"{brand} {model} {variant}"`, the form stored as the selected car.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.brand, self.model, self.variant)
    }

    /// Stable identifier carried by this listing's select control.
    ///
    /// Whitespace runs and slashes collapse to `_`, so
    /// `Maruti / Swift VXi AMT` becomes `book_Maruti_Swift_VXi_AMT`.
    pub fn select_token(&self) -> String {
        let raw = format!("{}{}_{}_{}", SELECT_TOKEN_PREFIX, self.brand, self.model, self.variant);
        let mut token = String::with_capacity(raw.len());
        let mut last_was_separator = false;
        for c in raw.chars() {
            if c.is_whitespace() || c == '/' {
                if !last_was_separator {
                    token.push('_');
                }
                last_was_separator = true;
            } else {
                token.push(c);
                last_was_separator = c == '_';
            }
        }
        token
    }

    /// Multi-line summary shown for the listing.
    pub fn caption(&self) -> String {
        format!(
            "🚗 {}\n📅 Year: {}\n⛽ Fuel: {}\n💰 Price: {}",
            self.display_name(),
            self.year,
            self.fuel_type,
            format_rupees(self.price)
        )
    }

    /// True when the free text names this listing.
    pub fn matches_name(&self, text: &str) -> bool {
        self.display_name().eq_ignore_ascii_case(text.trim())
    }
}

/// Photo metadata for a listing, ordered by `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarImage {
    pub path: String,
    pub sequence: Option<i32>,
    pub image_type: Option<String>,
}
