//! Rock-paper-scissors rules
//!
//! Pure functions deciding a match between two players and producing the
//! options shown in the opponent's selection menu.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::SelectOption;

/// Object a player can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Every choice, in declaration order
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Lowercase value carried on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    /// Capitalised label shown to users
    pub fn label(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }

    /// Verb used when `self` beats `other`, `None` otherwise
    pub fn verb_against(self, other: Choice) -> Option<&'static str> {
        match (self, other) {
            (Choice::Rock, Choice::Scissors) => Some("crushes"),
            (Choice::Paper, Choice::Rock) => Some("covers"),
            (Choice::Scissors, Choice::Paper) => Some("cuts"),
            _ => None,
        }
    }

    /// Whether `self` beats `other`
    pub fn beats(self, other: Choice) -> bool {
        self.verb_against(other).is_some()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a value is not one of the three choices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown choice: {0}")]
pub struct UnknownChoice(pub String);

impl FromStr for Choice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            other => Err(UnknownChoice(other.to_string())),
        }
    }
}

/// A participant and the object they picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player<'a> {
    pub id: &'a str,
    pub choice: Choice,
}

/// Result of a match seen from the challenger's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ChallengerWins,
    OpponentWins,
    Tie,
}

/// Decide a match between the challenger's and the opponent's choices
pub fn decide(challenger: Choice, opponent: Choice) -> Outcome {
    if challenger.beats(opponent) {
        Outcome::ChallengerWins
    } else if opponent.beats(challenger) {
        Outcome::OpponentWins
    } else {
        Outcome::Tie
    }
}

/// Evaluate a match and describe the result, mentioning both players
pub fn evaluate(challenger: &Player<'_>, opponent: &Player<'_>) -> String {
    let (winner, loser) = match decide(challenger.choice, opponent.choice) {
        Outcome::ChallengerWins => (challenger, opponent),
        Outcome::OpponentWins => (opponent, challenger),
        Outcome::Tie => {
            return format!(
                "<@{}> and <@{}> draw with **{}**",
                challenger.id, opponent.id, challenger.choice
            );
        }
    };

    // decide() only reports a winner when a verb exists
    let verb = winner.choice.verb_against(loser.choice).unwrap_or("beats");

    format!(
        "<@{}>'s **{}** {} <@{}>'s **{}**",
        winner.id, winner.choice, verb, loser.id, loser.choice
    )
}

/// All choices as menu options, in a random order drawn from `rng`
pub fn shuffled_choices_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<SelectOption> {
    let mut choices = Choice::ALL;
    choices.shuffle(rng);

    choices
        .iter()
        .map(|choice| SelectOption::new(choice.label(), choice.as_str()))
        .collect()
}

/// All choices as menu options, in a random order
pub fn shuffled_choices() -> Vec<SelectOption> {
    shuffled_choices_with(&mut rand::thread_rng())
}

const EMOJIS: [&str; 14] = [
    "😭", "😄", "😌", "🤓", "😎", "😤", "🤖", "😶‍🌫️", "🌏", "📸", "💿", "👋", "🌊", "✨",
];

/// Random decoration for flavour text
pub fn random_emoji() -> &'static str {
    EMOJIS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("✨")
}
