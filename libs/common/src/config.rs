//! Platform configuration for the interactions service
//!
//! Settings are read from the process environment through the `config`
//! crate. Tests feed an explicit map instead of touching the environment.

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{DiscordError, DiscordResult};

/// Default base URL of the platform REST API
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

/// Credentials and endpoints of the chat platform application
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Application id, used in command and webhook endpoints
    pub app_id: String,
    /// Guild that receives guild-scoped commands, if any
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Hex-encoded Ed25519 key used to verify inbound requests
    pub public_key: String,
    /// Bot token sent with every outbound request
    #[serde(rename = "discord_token")]
    pub token: String,
    /// Base URL of the REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl DiscordConfig {
    /// Create a new DiscordConfig from environment variables
    ///
    /// # Environment Variables
    /// - `APP_ID`: application id (required)
    /// - `PUBLIC_KEY`: hex-encoded verification key (required)
    /// - `DISCORD_TOKEN`: bot token (required)
    /// - `GUILD_ID`: guild for guild-scoped commands (optional)
    /// - `API_BASE_URL`: REST API base URL (default: "https://discord.com/api/v10")
    pub fn from_env() -> DiscordResult<Self> {
        Self::from_source(Environment::default())
    }

    /// Build the configuration from an explicit environment source
    pub fn from_source(source: Environment) -> DiscordResult<Self> {
        let mut config: DiscordConfig = Config::builder()
            .add_source(source)
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| DiscordError::Configuration(e.to_string()))?;

        // An empty GUILD_ID disables guild commands
        config.guild_id = config.guild_id.filter(|id| !id.trim().is_empty());

        Ok(config)
    }
}
