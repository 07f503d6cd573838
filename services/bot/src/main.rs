use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod dispatcher;
mod error;
mod followup;
mod game;
mod middleware;
mod models;
mod routes;
mod settings;
mod state;
mod store;

use common::{client::DiscordClient, config::DiscordConfig};

use crate::{
    dispatcher::Dispatcher, middleware::Verifier, settings::ServerConfig, state::AppState,
    store::InMemoryGameStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting interactions service");

    let discord_config = DiscordConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let verifier = Verifier::from_hex(&discord_config.public_key)?;
    let discord_client = DiscordClient::new(&discord_config)?;

    // Register slash commands in the background
    tokio::spawn(commands::install_all(
        discord_client.clone(),
        discord_config.app_id.clone(),
        discord_config.guild_id.clone(),
    ));

    let app_state = AppState {
        app_id: discord_config.app_id.clone(),
        dispatcher: Dispatcher::new(Arc::new(InMemoryGameStore::new())),
        verifier,
        discord_client,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Interactions service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down interactions service");
        })
        .await?;

    Ok(())
}
