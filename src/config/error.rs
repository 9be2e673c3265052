//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address")]
    InvalidSocketAddr,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Page size must be between 1 and 10")]
    InvalidPageSize,

    #[error("Invalid media base URL")]
    InvalidMediaBaseUrl,

    #[error("Collaborator timeout must be between 1 and 60000 ms: {0}")]
    InvalidCollaboratorTimeout(&'static str),

    #[error("Session directory must be set for the file backend")]
    MissingSessionDirectory,
}
