//! Interaction dispatcher
//!
//! Routes verified interactions to their handlers and drives the challenge
//! flow: a challenge stores the challenger's pick, the accept button opens a
//! private selection menu for the opponent, and the selection resolves the
//! game and removes it from the store.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::commands;
use crate::error::{BotError, BotResult};
use crate::followup::Followup;
use crate::game::{self, Choice, Player};
use crate::models::{
    Component, CustomId, Interaction, InteractionData, InteractionResponse, InteractionType,
    MessagePayload,
};
use crate::store::GameStore;

/// What the HTTP layer should do with an interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Answer with `response`, then apply `followup` in the background
    Reply {
        response: InteractionResponse,
        followup: Option<Followup>,
    },
    /// Selection for a game that is not in progress; nothing is sent
    SessionNotFound { session_id: String },
}

impl Dispatch {
    fn reply(response: InteractionResponse) -> Self {
        Dispatch::Reply {
            response,
            followup: None,
        }
    }
}

/// Handles interactions against a game store
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn GameStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Handle one interaction
    pub async fn dispatch(&self, interaction: &Interaction) -> BotResult<Dispatch> {
        match interaction.kind {
            InteractionType::Ping => Ok(Dispatch::reply(InteractionResponse::pong())),
            InteractionType::ApplicationCommand => self.handle_command(interaction).await,
            InteractionType::MessageComponent => self.handle_component(interaction).await,
            InteractionType::Other(kind) => Err(BotError::UnknownInteraction(kind)),
        }
    }

    async fn handle_command(&self, interaction: &Interaction) -> BotResult<Dispatch> {
        let data = interaction_data(interaction)?;
        let name = data
            .name
            .as_deref()
            .ok_or_else(|| BotError::BadRequest("Missing command name".to_string()))?;

        if name == "challenge" {
            return self.challenge(interaction, data).await;
        }

        let content = stateless_command(name, data)?;
        Ok(Dispatch::reply(InteractionResponse::message(
            MessagePayload::text(content),
        )))
    }

    async fn challenge(
        &self,
        interaction: &Interaction,
        data: &InteractionData,
    ) -> BotResult<Dispatch> {
        let challenger_id = invoker(interaction)?;
        let choice: Choice = data
            .options
            .first()
            .and_then(|option| option.as_str())
            .ok_or_else(|| BotError::BadRequest("Missing object choice".to_string()))?
            .parse::<Choice>()
            .map_err(|e| BotError::BadRequest(e.to_string()))?;

        let session_id = interaction.id.clone();
        self.store
            .create(&session_id, challenger_id, choice)
            .await
            .map_err(|e| {
                error!("Failed to store game {}: {}", session_id, e);
                BotError::InternalServerError
            })?;

        info!("Game {} challenged by {}", session_id, challenger_id);

        let accept = CustomId::Accept { session_id };
        let message = MessagePayload::text(format!(
            "Rock papers scissors challenge from <@{}>",
            challenger_id
        ))
        .with_components(vec![Component::row(Component::button(
            accept.to_string(),
            "Accept",
        ))]);

        Ok(Dispatch::reply(InteractionResponse::message(message)))
    }

    async fn handle_component(&self, interaction: &Interaction) -> BotResult<Dispatch> {
        let data = interaction_data(interaction)?;
        let custom_id: CustomId = data
            .custom_id
            .as_deref()
            .ok_or_else(|| BotError::BadRequest("Missing component identifier".to_string()))?
            .parse::<CustomId>()
            .map_err(|e| BotError::BadRequest(e.to_string()))?;
        debug!("Component {} for game {}", custom_id, custom_id.session_id());

        match custom_id {
            CustomId::Accept { session_id } => Ok(self.accept(interaction, session_id)),
            CustomId::Select { session_id } => self.select(interaction, data, session_id).await,
        }
    }

    fn accept(&self, interaction: &Interaction, session_id: String) -> Dispatch {
        info!("Game {} accepted by {:?}", session_id, interaction.invoker_id());

        let select = CustomId::Select { session_id };
        let message = MessagePayload::text("What is your object of choice?")
            .ephemeral()
            .with_components(vec![Component::row(Component::select(
                select.to_string(),
                game::shuffled_choices(),
            ))]);

        let followup = interaction.message.as_ref().map(|message| Followup::DeleteMessage {
            token: interaction.token.clone(),
            message_id: message.id.clone(),
        });

        Dispatch::Reply {
            response: InteractionResponse::message(message),
            followup,
        }
    }

    async fn select(
        &self,
        interaction: &Interaction,
        data: &InteractionData,
        session_id: String,
    ) -> BotResult<Dispatch> {
        let opponent_id = invoker(interaction)?;
        let opponent_choice: Choice = data
            .values
            .first()
            .ok_or_else(|| BotError::BadRequest("Missing selected value".to_string()))?
            .parse::<Choice>()
            .map_err(|e| BotError::BadRequest(e.to_string()))?;

        let session = self.store.take(&session_id).await.map_err(|e| {
            error!("Failed to load game {}: {}", session_id, e);
            BotError::InternalServerError
        })?;

        let Some(session) = session else {
            warn!("Selection for unknown game {}", session_id);
            return Ok(Dispatch::SessionNotFound { session_id });
        };

        let result = game::evaluate(
            &Player {
                id: &session.challenger_id,
                choice: session.choice,
            },
            &Player {
                id: opponent_id,
                choice: opponent_choice,
            },
        );
        info!(
            "Game {} (started {}) resolved: {}",
            session_id, session.created_at, result
        );

        let followup = interaction.message.as_ref().map(|message| Followup::EditMessage {
            token: interaction.token.clone(),
            message_id: message.id.clone(),
            message: MessagePayload::text(format!("Nice choice {}", game::random_emoji()))
                .with_components(vec![]),
        });

        Ok(Dispatch::Reply {
            response: InteractionResponse::message(MessagePayload::text(result)),
            followup,
        })
    }
}

fn interaction_data(interaction: &Interaction) -> BotResult<&InteractionData> {
    interaction
        .data
        .as_ref()
        .ok_or_else(|| BotError::BadRequest("Missing interaction data".to_string()))
}

fn invoker(interaction: &Interaction) -> BotResult<&str> {
    interaction
        .invoker_id()
        .ok_or_else(|| BotError::BadRequest("Missing invoking user".to_string()))
}

/// Commands answered without touching the game store
fn stateless_command(name: &str, data: &InteractionData) -> BotResult<String> {
    let missing = |option: &str| BotError::BadRequest(format!("Missing option: {}", option));

    let content = match name {
        "test" => commands::hello(),
        "coinflip" => commands::coinflip(&mut rand::thread_rng()),
        "dice" => {
            let count = commands::int_option(data, "count").ok_or_else(|| missing("count"))?;
            let sides = commands::int_option(data, "sides").ok_or_else(|| missing("sides"))?;
            commands::dice(&mut rand::thread_rng(), count, sides)
        }
        "win" => commands::win(commands::str_option(data, "user").ok_or_else(|| missing("user"))?),
        "lose" => {
            commands::lose(commands::str_option(data, "user").ok_or_else(|| missing("user"))?)
        }
        other => return Err(BotError::UnknownCommand(other.to_string())),
    };

    Ok(content)
}
