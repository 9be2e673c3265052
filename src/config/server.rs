//! HTTP listener settings for the conversation API

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Listener, logging and browser-access settings.
///
/// `cors_origins` lists the sites allowed to embed the chat widget. An
/// unset list allows any origin, which production refuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Tracing filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,

    /// Upper bound on one request, including every collaborator call of the turn
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated widget origins, e.g. `https://sherpahyundai.in`
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidSocketAddr)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Widget origins, trimmed, blanks dropped. Empty means any origin.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr()?;

        let origins = self.cors_origins_list();
        if let Some(bad) = origins.iter().find(|origin| !is_origin(origin)) {
            return Err(ValidationError::InvalidCorsOrigin(bad.clone()));
        }
        if origins.is_empty() && self.is_production() {
            return Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"));
        }
        Ok(())
    }
}

/// `scheme://host[:port]` with an http(s) scheme and no path.
fn is_origin(origin: &str) -> bool {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.contains('/'))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            json_logs: false,
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,test_drive_sherpa=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(origins: &str) -> ServerConfig {
        ServerConfig {
            cors_origins: Some(origins.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_allow_any_origin_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.cors_origins_list().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn widget_origins_are_trimmed_and_blanks_dropped() {
        let config = widget(" https://sherpahyundai.in, ,http://localhost:5173,");
        assert_eq!(
            config.cors_origins_list(),
            ["https://sherpahyundai.in", "http://localhost:5173"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn origin_with_path_is_rejected() {
        let config = widget("https://sherpahyundai.in/chat");
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCorsOrigin(origin)) if origin == "https://sherpahyundai.in/chat"
        ));
    }

    #[test]
    fn bare_host_is_not_an_origin() {
        assert!(matches!(
            widget("sherpahyundai.in").validate(),
            Err(ValidationError::InvalidCorsOrigin(_))
        ));
    }

    #[test]
    fn production_requires_explicit_origins() {
        let mut config = ServerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"))
        ));

        config.cors_origins = Some("https://sherpahyundai.in".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let config = ServerConfig {
            host: "showroom-gateway".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSocketAddr)
        ));
    }

    #[test]
    fn request_timeout_must_be_bounded() {
        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }
}
