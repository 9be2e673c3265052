//! Structured display units and image availability.

use serde::{Deserialize, Serialize};

use crate::domain::browse::CarImage;

/// Title shown on every per-listing select control.
pub const SELECT_TITLE: &str = "SELECT";
pub const BROWSE_MORE: &str = "Browse More Cars";
pub const CHANGE_CRITERIA: &str = "Change criteria";

const IMAGES_MISSING: &str = "📸 Images: Not available at the moment";
const IMAGES_PRIVATE: &str =
    "📸 Images: Available but not publicly accessible. Please visit our website to view images.";

/// One renderable message in a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayUnit {
    Image { link: String, caption: String },
    Text { body: String },
    Select { id: String, title: String },
}

impl DisplayUnit {
    /// Summary unit for a listing, text-only unless a public link exists.
    pub fn summary(caption: String, images: &ImageAvailability) -> Self {
        match images {
            ImageAvailability::Public(link) => DisplayUnit::Image {
                link: link.clone(),
                caption,
            },
            ImageAvailability::NotPublic(_) => DisplayUnit::Text {
                body: format!("{}\n\n{}", caption, IMAGES_PRIVATE),
            },
            ImageAvailability::Missing => DisplayUnit::Text {
                body: format!("{}\n\n{}", caption, IMAGES_MISSING),
            },
        }
    }

    pub fn select(id: String) -> Self {
        DisplayUnit::Select {
            id,
            title: SELECT_TITLE.to_string(),
        }
    }
}

/// Trailing control appended after a page of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    BrowseMore,
    ChangeCriteria,
}

impl PageControl {
    pub fn label(&self) -> &'static str {
        match self {
            PageControl::BrowseMore => BROWSE_MORE,
            PageControl::ChangeCriteria => CHANGE_CRITERIA,
        }
    }
}

/// What is known about a listing's photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAvailability {
    /// A link end users can open.
    Public(String),
    /// A link exists but only resolves on the dealer's network.
    NotPublic(String),
    Missing,
}

impl ImageAvailability {
    /// Picks the first usable image and turns its path into a link.
    ///
    /// Absolute `http` paths are kept; relative ones are joined onto
    /// `media_base_url`.
    pub fn resolve(images: &[CarImage], media_base_url: &str) -> Self {
        let Some(first) = images.iter().find(|img| !img.path.trim().is_empty()) else {
            return ImageAvailability::Missing;
        };

        let path = first.path.trim();
        let link = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            let base = media_base_url.trim_end_matches('/');
            if base.is_empty() {
                return ImageAvailability::Missing;
            }
            format!("{}/{}", base, path.trim_start_matches('/'))
        };

        if is_publicly_accessible(&link) {
            ImageAvailability::Public(link)
        } else {
            ImageAvailability::NotPublic(link)
        }
    }
}

fn is_publicly_accessible(link: &str) -> bool {
    !link.contains("localhost") && !link.contains("127.0.0.1")
}
