//! Runtime knobs for the dialogue controller.

use std::time::Duration;

use crate::domain::booking::ShowroomDetails;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;

/// Everything the controller needs that is not per-session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSettings {
    pub page_size: usize,
    pub dealership_name: String,
    pub showroom: ShowroomDetails,
    /// Prefix for relative image paths. Empty disables image links.
    pub media_base_url: String,
    pub extractor_timeout: Duration,
    pub inventory_timeout: Duration,
    pub commit_timeout: Duration,
}

impl DialogueSettings {
    pub fn menu_greeting(&self) -> String {
        format!(
            "Hello! 👋 Welcome to {}. How can I assist you today?",
            self.dealership_name
        )
    }
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            dealership_name: "Sherpa Hyundai".to_string(),
            showroom: ShowroomDetails {
                address: "Sherpa Hyundai Showroom, 123 MG Road, Bangalore".to_string(),
                helpline: "+91-9876543210".to_string(),
            },
            media_base_url: String::new(),
            extractor_timeout: Duration::from_millis(3000),
            inventory_timeout: Duration::from_millis(5000),
            commit_timeout: Duration::from_millis(5000),
        }
    }
}
