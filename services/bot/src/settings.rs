//! HTTP server settings

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: listening port (default: 3000)
    pub fn from_env() -> Result<Self> {
        Self::from_source(Environment::default())
    }

    /// Build the configuration from an explicit environment source
    pub fn from_source(source: Environment) -> Result<Self> {
        let config = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
