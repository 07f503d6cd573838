//! Common library for the rock-paper-scissors interactions service
//!
//! This crate provides the platform plumbing shared by the services:
//! configuration of the application credentials, the error taxonomy for
//! platform calls, and an authenticated REST client.
//!
//! ```rust,no_run
//! use common::{client::DiscordClient, config::DiscordConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DiscordConfig::from_env()?;
//!     let client = DiscordClient::new(&config)?;
//!     let commands = client.list_commands(&config.app_id, None).await?;
//!     println!("Installed commands: {}", commands.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
