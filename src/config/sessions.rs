//! Session store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where dialogue sessions live between turns
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    File,
}

/// Session store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionsConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Directory for YAML session files (file backend)
    pub directory: Option<PathBuf>,
}

impl SessionsConfig {
    /// Validate session store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == SessionBackend::File
            && self.directory.as_ref().map_or(true, |d| d.as_os_str().is_empty())
        {
            return Err(ValidationError::MissingSessionDirectory);
        }
        Ok(())
    }
}
