//! Slash commands: definitions, installation and the stateless handlers

use common::{client::DiscordClient, error::DiscordResult};
use rand::Rng;
use serde::Serialize;
use tracing::{error, info};

use crate::game::{Choice, random_emoji};
use crate::models::InteractionData;

/// Largest number of dice rolled by one command
const MAX_DICE: i64 = 100;

/// Largest die accepted; keeps the sum of `MAX_DICE` rolls within `i64`
const MAX_SIDES: i64 = 1_000_000;

const CHAT_INPUT: u8 = 1;
const STRING_OPTION: u8 = 3;
const INTEGER_OPTION: u8 = 4;
const USER_OPTION: u8 = 6;

/// Application command as registered with the platform
#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDefinition {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionChoice {
    pub name: &'static str,
    pub value: &'static str,
}

impl OptionDefinition {
    fn required(kind: u8, name: &'static str, description: &'static str) -> Self {
        Self {
            kind,
            name,
            description,
            required: true,
            choices: Vec::new(),
            min_value: None,
            max_value: None,
        }
    }
}

fn command(
    name: &'static str,
    description: &'static str,
    options: Vec<OptionDefinition>,
) -> CommandDefinition {
    CommandDefinition {
        name,
        description,
        kind: CHAT_INPUT,
        options,
    }
}

/// Commands installed in the configured guild
pub fn guild_commands() -> Vec<CommandDefinition> {
    vec![command("test", "Basic guild command", vec![])]
}

/// Commands installed for every guild
pub fn global_commands() -> Vec<CommandDefinition> {
    let object = OptionDefinition {
        choices: Choice::ALL
            .iter()
            .map(|choice| OptionChoice {
                name: choice.label(),
                value: choice.as_str(),
            })
            .collect(),
        ..OptionDefinition::required(STRING_OPTION, "object", "Pick your object")
    };

    let count = OptionDefinition {
        min_value: Some(1),
        max_value: Some(MAX_DICE),
        ..OptionDefinition::required(
            INTEGER_OPTION,
            "count",
            "The number of dice you want to roll.",
        )
    };
    let sides = OptionDefinition {
        min_value: Some(1),
        max_value: Some(MAX_SIDES),
        ..OptionDefinition::required(INTEGER_OPTION, "sides", "The number of sides per dice.")
    };

    vec![
        command(
            "challenge",
            "Challenge to a match of rock paper scissors",
            vec![object],
        ),
        command("coinflip", "flips a coin", vec![]),
        command("dice", "Rolls a dice", vec![count, sides]),
        command(
            "win",
            "pings the person calling the command with w",
            vec![OptionDefinition::required(
                USER_OPTION,
                "user",
                "Pick your desired winner",
            )],
        ),
        command(
            "lose",
            "pings the person specified with L",
            vec![OptionDefinition::required(
                USER_OPTION,
                "user",
                "Pick your desired loser",
            )],
        ),
    ]
}

/// Install every command of `commands` whose name is not yet registered
///
/// Commands are matched by name only, so changed definitions are not updated.
/// Returns the names that were installed.
pub async fn ensure_installed(
    client: &DiscordClient,
    app_id: &str,
    guild_id: Option<&str>,
    commands: &[CommandDefinition],
) -> DiscordResult<Vec<&'static str>> {
    let installed = client.list_commands(app_id, guild_id).await?;
    let installed_names: Vec<&str> = installed
        .iter()
        .filter_map(|command| command["name"].as_str())
        .collect();

    let mut created = Vec::new();
    for command in commands {
        if installed_names.contains(&command.name) {
            info!("\"{}\" command already installed", command.name);
            continue;
        }

        info!("Installing \"{}\"", command.name);
        client.create_command(app_id, guild_id, command).await?;
        created.push(command.name);
    }

    Ok(created)
}

/// Install guild and global commands, logging failures
pub async fn install_all(client: DiscordClient, app_id: String, guild_id: Option<String>) {
    if let Some(guild_id) = guild_id.as_deref() {
        let result = ensure_installed(&client, &app_id, Some(guild_id), &guild_commands()).await;
        if let Err(e) = result {
            error!("Failed to install guild commands: {}", e);
        }
    }

    if let Err(e) = ensure_installed(&client, &app_id, None, &global_commands()).await {
        error!("Failed to install global commands: {}", e);
    }
}

/// `test`: greeting with a random emoji
pub fn hello() -> String {
    format!("hello world {}", random_emoji())
}

/// `coinflip`: heads or tails with equal odds
pub fn coinflip<R: Rng>(rng: &mut R) -> String {
    if rng.gen_bool(0.5) {
        "Your coin landed as Heads!".to_string()
    } else {
        "Your coin landed as Tails!".to_string()
    }
}

/// `dice`: sum of `count` rolls of a `sides`-sided die
pub fn dice<R: Rng>(rng: &mut R, count: i64, sides: i64) -> String {
    let count = count.clamp(0, MAX_DICE);
    let sides = sides.clamp(1, MAX_SIDES);

    let sum: i64 = (0..count).map(|_| rng.gen_range(1..=sides)).sum();
    format!("You rolled {}", sum)
}

/// `win`: congratulate a user
pub fn win(user_id: &str) -> String {
    format!("W <@{}>", user_id)
}

/// `lose`: commiserate with a user
pub fn lose(user_id: &str) -> String {
    format!("L <@{}>", user_id)
}

/// Integer option `name`, if present
pub fn int_option(data: &InteractionData, name: &str) -> Option<i64> {
    data.option(name).and_then(|option| option.as_i64())
}

/// String or user option `name`, if present
pub fn str_option<'a>(data: &'a InteractionData, name: &str) -> Option<&'a str> {
    data.option(name).and_then(|option| option.as_str())
}
