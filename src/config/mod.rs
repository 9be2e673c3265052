//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TEST_DRIVE_SHERPA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use test_drive_sherpa::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving {}", config.dialogue.dealership_name);
//! ```

mod database;
mod dialogue;
mod error;
mod extractor;
mod server;
mod sessions;

pub use database::DatabaseConfig;
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use extractor::{ExtractorConfig, ExtractorProvider};
pub use server::{Environment, ServerConfig};
pub use sessions::{SessionBackend, SessionsConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// demo configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL inventory and bookings)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Dialogue wording, paging and collaborator time bounds
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Slot extractor selection
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Session store selection
    #[serde(default)]
    pub sessions: SessionsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TEST_DRIVE_SHERPA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TEST_DRIVE_SHERPA__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TEST_DRIVE_SHERPA__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("TEST_DRIVE_SHERPA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.dialogue.validate()?;
        self.extractor.validate()?;
        self.sessions.validate()?;
        Ok(())
    }
}
