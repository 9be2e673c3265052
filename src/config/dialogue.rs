//! Dialogue configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::booking::ShowroomDetails;
use crate::domain::dialogue::DialogueSettings;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;

use super::error::ValidationError;

const MAX_COLLABORATOR_TIMEOUT_MS: u64 = 60_000;

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Listings per results page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Name used in the menu greeting
    #[serde(default = "default_dealership_name")]
    pub dealership_name: String,

    /// Address printed for showroom pickups
    #[serde(default = "default_showroom_address")]
    pub showroom_address: String,

    /// Helpline printed on confirmations
    #[serde(default = "default_helpline")]
    pub helpline: String,

    /// Prefix for relative image paths; empty disables image links
    #[serde(default)]
    pub media_base_url: String,

    #[serde(default = "default_extractor_timeout")]
    pub extractor_timeout_ms: u64,

    #[serde(default = "default_inventory_timeout")]
    pub inventory_timeout_ms: u64,

    #[serde(default = "default_commit_timeout")]
    pub commit_timeout_ms: u64,
}

impl DialogueConfig {
    /// Runtime form handed to the controller.
    pub fn settings(&self) -> DialogueSettings {
        DialogueSettings {
            page_size: self.page_size,
            dealership_name: self.dealership_name.clone(),
            showroom: ShowroomDetails {
                address: self.showroom_address.clone(),
                helpline: self.helpline.clone(),
            },
            media_base_url: self.media_base_url.trim().to_string(),
            extractor_timeout: Duration::from_millis(self.extractor_timeout_ms),
            inventory_timeout: Duration::from_millis(self.inventory_timeout_ms),
            commit_timeout: Duration::from_millis(self.commit_timeout_ms),
        }
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 || self.page_size > 10 {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.dealership_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DIALOGUE__DEALERSHIP_NAME"));
        }
        let media = self.media_base_url.trim();
        if !media.is_empty() && !media.starts_with("http://") && !media.starts_with("https://") {
            return Err(ValidationError::InvalidMediaBaseUrl);
        }
        for (name, ms) in [
            ("extractor_timeout_ms", self.extractor_timeout_ms),
            ("inventory_timeout_ms", self.inventory_timeout_ms),
            ("commit_timeout_ms", self.commit_timeout_ms),
        ] {
            if ms == 0 || ms > MAX_COLLABORATOR_TIMEOUT_MS {
                return Err(ValidationError::InvalidCollaboratorTimeout(name));
            }
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            dealership_name: default_dealership_name(),
            showroom_address: default_showroom_address(),
            helpline: default_helpline(),
            media_base_url: String::new(),
            extractor_timeout_ms: default_extractor_timeout(),
            inventory_timeout_ms: default_inventory_timeout(),
            commit_timeout_ms: default_commit_timeout(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_dealership_name() -> String {
    "Sherpa Hyundai".to_string()
}

fn default_showroom_address() -> String {
    "Sherpa Hyundai Showroom, 123 MG Road, Bangalore".to_string()
}

fn default_helpline() -> String {
    "+91-9876543210".to_string()
}

fn default_extractor_timeout() -> u64 {
    3000
}

fn default_inventory_timeout() -> u64 {
    5000
}

fn default_commit_timeout() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_controller_defaults() {
        assert_eq!(DialogueConfig::default().settings(), DialogueSettings::default());
    }

    #[test]
    fn test_settings_carry_overrides() {
        let config = DialogueConfig {
            page_size: 5,
            dealership_name: "Sherpa Motors".to_string(),
            media_base_url: " https://cdn.example.com/ ".to_string(),
            commit_timeout_ms: 250,
            ..Default::default()
        };
        let settings = config.settings();
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.media_base_url, "https://cdn.example.com/");
        assert_eq!(settings.commit_timeout, Duration::from_millis(250));
        assert!(settings.menu_greeting().contains("Sherpa Motors"));
    }

    #[test]
    fn test_validation_page_size() {
        for page_size in [0, 11] {
            let config = DialogueConfig {
                page_size,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidPageSize)
            ));
        }
    }

    #[test]
    fn test_validation_media_url_scheme() {
        let config = DialogueConfig {
            media_base_url: "ftp://files.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMediaBaseUrl)
        ));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = DialogueConfig {
            inventory_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCollaboratorTimeout("inventory_timeout_ms"))
        ));
    }

    #[test]
    fn test_validation_defaults_pass() {
        assert!(DialogueConfig::default().validate().is_ok());
    }
}
