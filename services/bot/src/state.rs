//! Application state shared across handlers

use common::client::DiscordClient;

use crate::{dispatcher::Dispatcher, middleware::Verifier};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub app_id: String,
    pub dispatcher: Dispatcher,
    pub verifier: Verifier,
    pub discord_client: DiscordClient,
}
