//! REST client for the chat platform API
//!
//! This module wraps `reqwest` with the authentication and headers the
//! platform expects and exposes the handful of endpoints the bot needs:
//! webhook message management and application command registration.

use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::DiscordConfig;
use crate::error::{DiscordError, DiscordResult};

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/stephane-segning/rps-interactions, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Authenticated client for the platform REST API
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DiscordClient {
    /// Create a new client from the platform configuration
    pub fn new(config: &DiscordConfig) -> DiscordResult<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(DiscordClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Send a request to `endpoint`, relative to the API base URL
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> DiscordResult<Response> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Platform request to {} failed with {}: {}", url, status, body);
            return Err(DiscordError::Api { status, body });
        }

        Ok(response)
    }

    /// Delete a message previously sent through an interaction webhook
    pub async fn delete_webhook_message(
        &self,
        app_id: &str,
        token: &str,
        message_id: &str,
    ) -> DiscordResult<()> {
        let endpoint = format!("webhooks/{}/{}/messages/{}", app_id, token, message_id);
        self.request::<Value>(Method::DELETE, &endpoint, None).await?;
        Ok(())
    }

    /// Replace the content of a message previously sent through an interaction webhook
    pub async fn edit_webhook_message<B: Serialize + ?Sized>(
        &self,
        app_id: &str,
        token: &str,
        message_id: &str,
        body: &B,
    ) -> DiscordResult<()> {
        let endpoint = format!("webhooks/{}/{}/messages/{}", app_id, token, message_id);
        self.request(Method::PATCH, &endpoint, Some(body)).await?;
        Ok(())
    }

    /// List the application commands installed globally or in a guild
    pub async fn list_commands(
        &self,
        app_id: &str,
        guild_id: Option<&str>,
    ) -> DiscordResult<Vec<Value>> {
        let endpoint = commands_endpoint(app_id, guild_id);
        let response = self.request::<Value>(Method::GET, &endpoint, None).await?;
        let commands = response.json::<Vec<Value>>().await?;
        Ok(commands)
    }

    /// Register an application command globally or in a guild
    pub async fn create_command<B: Serialize + ?Sized>(
        &self,
        app_id: &str,
        guild_id: Option<&str>,
        command: &B,
    ) -> DiscordResult<()> {
        let endpoint = commands_endpoint(app_id, guild_id);
        self.request(Method::POST, &endpoint, Some(command)).await?;
        Ok(())
    }
}

fn commands_endpoint(app_id: &str, guild_id: Option<&str>) -> String {
    match guild_id {
        Some(guild_id) => format!("applications/{}/guilds/{}/commands", app_id, guild_id),
        None => format!("applications/{}/commands", app_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_endpoint() {
        assert_eq!(commands_endpoint("1", None), "applications/1/commands");
        assert_eq!(
            commands_endpoint("1", Some("2")),
            "applications/1/guilds/2/commands"
        );
    }
}
