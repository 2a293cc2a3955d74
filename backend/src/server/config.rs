//! Server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

/// Default bind address when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `DATABASE_URL` is missing or empty.
    #[error("DATABASE_URL must be set to a PostgreSQL connection URL")]
    MissingDatabaseUrl,
    /// `BIND_ADDR` could not be parsed as a socket address.
    #[error("BIND_ADDR is not a valid socket address: {value}")]
    InvalidBindAddr { value: String },
}

/// Builder-style configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    pub fn new(bind_addr: SocketAddr, database_url: impl Into<String>) -> Self {
        Self {
            bind_addr,
            database_url: database_url.into(),
        }
    }

    /// Read the configuration from `BIND_ADDR` and `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_value = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: bind_value })?;

        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self::new(bind_addr, database_url))
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// PostgreSQL connection URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn explicit_values_round_trip() {
        let config = ServerConfig::new(
            "127.0.0.1:9090".parse().expect("valid address"),
            "postgres://localhost/breadvan",
        );

        assert_eq!(config.bind_addr().port(), 9090);
        assert_eq!(config.database_url(), "postgres://localhost/breadvan");
    }

    #[rstest]
    fn default_bind_addr_parses() {
        let parsed: Result<SocketAddr, _> = DEFAULT_BIND_ADDR.parse();
        assert!(parsed.is_ok());
    }
}
