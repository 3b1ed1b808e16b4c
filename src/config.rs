//! Configuration management for the shelf server
//!
//! Loads settings from config.toml with SHELF_-prefixed environment
//! overrides and validates them before the server starts.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Directory holding the public/ and private/ roots
    pub data_root: String,

    /// Base URL prefixed to every public item URL
    pub base_url: String,

    /// Bearer token required on every /api request
    pub api_token: String,

    /// Maximum upload size in MB
    pub max_upload_mb: u64,
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides.
    /// Missing file and keys fall back to defaults so a bare checkout runs.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("data_root", "./data")?
            .set_default("base_url", "http://127.0.0.1:8080")?
            .set_default("api_token", "")?
            .set_default("max_upload_mb", 64)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("SHELF"))
            .build()?;
        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }
        if self.data_root.is_empty() {
            return Err(ConfigError::Message("data_root cannot be empty".into()));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Message("base_url cannot be empty".into()));
        }
        if self.api_token.is_empty() {
            return Err(ConfigError::Message(
                "api_token must be set (SHELF_API_TOKEN or config.toml)".into(),
            ));
        }
        if self.max_upload_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_mb must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Get bind address and port as a socket address string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the data root as a PathBuf.
    pub fn data_root_path(&self) -> PathBuf {
        PathBuf::from(&self.data_root)
    }

    /// Get the maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb as usize) * 1024 * 1024
    }
}
