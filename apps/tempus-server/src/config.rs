//! Layered application configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file given on
//! the command line, `TEMPUS__`-prefixed environment variables, CLI
//! overrides.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use temporal::config::TemporalConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON-formatted log lines instead of the compact format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub temporal: TemporalConfig,
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed or a layer carries
    /// unknown or ill-typed fields.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("TEMPUS__").split("__"));
        figment
            .extract()
            .context("failed to load configuration")
    }

    /// Applies the `--port` CLI override to the bind address.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured bind address is not a socket
    /// address.
    pub fn apply_port_override(&mut self, port: Option<u16>) -> Result<()> {
        let Some(port) = port else {
            return Ok(());
        };
        let mut addr: SocketAddr = self.server.bind_addr.parse().with_context(|| {
            format!("invalid bind address '{}'", self.server.bind_addr)
        })?;
        addr.set_port(port);
        self.server.bind_addr = addr.to_string();
        Ok(())
    }

    /// Renders the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.temporal.page_size_limit, 100);
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();
        config.apply_port_override(Some(9000)).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("bind_addr"));
        assert!(yaml.contains("page_size_limit"));
    }
}
