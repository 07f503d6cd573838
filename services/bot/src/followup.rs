//! Out-of-band updates to messages sent by earlier interactions
//!
//! Follow-ups run after the synchronous response has been handed back.
//! Failures are logged and dropped.

use common::{client::DiscordClient, error::DiscordResult};
use tracing::{error, info};

use crate::models::MessagePayload;

/// Change to apply to the message a component was attached to
#[derive(Debug, Clone, PartialEq)]
pub enum Followup {
    /// Remove the message
    DeleteMessage { token: String, message_id: String },
    /// Replace the message's content and components
    EditMessage {
        token: String,
        message_id: String,
        message: MessagePayload,
    },
}

impl Followup {
    /// Apply the follow-up through the platform API
    pub async fn execute(&self, client: &DiscordClient, app_id: &str) -> DiscordResult<()> {
        match self {
            Followup::DeleteMessage { token, message_id } => {
                client
                    .delete_webhook_message(app_id, token, message_id)
                    .await
            }
            Followup::EditMessage {
                token,
                message_id,
                message,
            } => {
                client
                    .edit_webhook_message(app_id, token, message_id, message)
                    .await
            }
        }
    }

    /// Run the follow-up in the background
    pub fn spawn(self, client: DiscordClient, app_id: String) {
        tokio::spawn(async move {
            match self.execute(&client, &app_id).await {
                Ok(()) => info!("Follow-up applied: {}", self.describe()),
                Err(e) => error!("Failed to apply follow-up ({}): {}", self.describe(), e),
            }
        });
    }

    fn describe(&self) -> String {
        match self {
            Followup::DeleteMessage { message_id, .. } => format!("delete message {}", message_id),
            Followup::EditMessage { message_id, .. } => format!("edit message {}", message_id),
        }
    }
}
