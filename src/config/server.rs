//! HTTP listener settings for the access API.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, logging, and CORS settings read by `main`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Production deployments require an HTTPS backend.
    #[serde(default)]
    pub production: bool,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated origins allowed to call the API from a browser.
    #[serde(default)]
    pub cors_origins: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Non-blank entries of `cors_origins`, trimmed.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            production: false,
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: String::new(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,portal_access=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listens_on_all_interfaces_by_default() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_listener_from_json() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"host":"127.0.0.1","port":9000,"production":true}"#).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert!(config.is_production());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_unparseable_host() {
        let result = serde_json::from_str::<ServerConfig>(r#"{"host":"portal.local"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn allowed_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: " https://fundacion.example.org ,,http://localhost:5173".to_string(),
            ..Default::default()
        };
        let origins: Vec<&str> = config.allowed_origins().collect();
        assert_eq!(
            origins,
            vec!["https://fundacion.example.org", "http://localhost:5173"]
        );
    }

    #[test]
    fn no_origins_when_unset() {
        assert_eq!(ServerConfig::default().allowed_origins().count(), 0);
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn request_timeout_must_be_between_one_second_and_five_minutes() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}
