//! Slot extractor configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::adapters::extractor::OpenAIExtractorConfig;

use super::error::ValidationError;

/// Which slot extractor backs free-text understanding
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorProvider {
    #[default]
    Keyword,
    OpenAI,
}

/// Slot extractor configuration
#[derive(Clone, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub provider: ExtractorProvider,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// OpenAI client settings, when a key is configured.
    pub fn openai(&self) -> Option<OpenAIExtractorConfig> {
        let key = self.openai_api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(
            OpenAIExtractorConfig::new(key)
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout()),
        )
    }

    /// Validate extractor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == ExtractorProvider::OpenAI && !self.has_openai() {
            return Err(ValidationError::MissingRequired("EXTRACTOR__OPENAI_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("provider", &self.provider)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            provider: ExtractorProvider::default(),
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    5
}
