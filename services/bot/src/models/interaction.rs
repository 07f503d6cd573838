//! Inbound interaction payloads

use serde::Deserialize;
use serde_json::Value;

/// Kind of interaction delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            3 => InteractionType::MessageComponent,
            other => InteractionType::Other(other),
        }
    }
}

/// Interaction payload, already verified by the signature middleware
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub token: String,
    pub data: Option<InteractionData>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub message: Option<MessageRef>,
}

impl Interaction {
    /// Id of the user who triggered the interaction, inside a guild or in DMs
    pub fn invoker_id(&self) -> Option<&str> {
        self.member
            .as_ref()
            .map(|member| &member.user)
            .or(self.user.as_ref())
            .map(|user| user.id.as_str())
    }
}

/// Command or component data carried by an interaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    /// Command name, for application commands
    pub name: Option<String>,
    /// Command options, in declaration order
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Component identifier, for component interactions
    pub custom_id: Option<String>,
    /// Selected values, for select menus
    #[serde(default)]
    pub values: Vec<String>,
}

impl InteractionData {
    /// Option named `name`
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|option| option.name == name)
    }
}

/// Typed command argument
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl CommandOption {
    /// Value as a string; user and string options arrive as strings
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Value as an integer
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
}

/// Message a component was attached to
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRef {
    pub id: String,
}
