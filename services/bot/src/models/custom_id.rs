//! Identifiers embedded in message components
//!
//! A component's `custom_id` carries the action it triggers and the game it
//! belongs to. The string form is `accept_button_<session>` or
//! `select_choice_<session>`; everything after the tag is the session id.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const ACCEPT_PREFIX: &str = "accept_button_";
const SELECT_PREFIX: &str = "select_choice_";

/// Action bound to a component of a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomId {
    /// Opponent accepts the challenge
    Accept { session_id: String },
    /// Opponent submits their choice
    Select { session_id: String },
}

impl CustomId {
    pub fn session_id(&self) -> &str {
        match self {
            CustomId::Accept { session_id } | CustomId::Select { session_id } => session_id,
        }
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomId::Accept { session_id } => write!(f, "{}{}", ACCEPT_PREFIX, session_id),
            CustomId::Select { session_id } => write!(f, "{}{}", SELECT_PREFIX, session_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomIdError {
    #[error("Unknown component identifier: {0}")]
    UnknownTag(String),

    #[error("Component identifier without session: {0}")]
    MissingSession(String),
}

impl FromStr for CustomId {
    type Err = CustomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (session_id, accept) = if let Some(rest) = s.strip_prefix(ACCEPT_PREFIX) {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix(SELECT_PREFIX) {
            (rest, false)
        } else {
            return Err(CustomIdError::UnknownTag(s.to_string()));
        };

        if session_id.is_empty() {
            return Err(CustomIdError::MissingSession(s.to_string()));
        }

        let session_id = session_id.to_string();
        Ok(if accept {
            CustomId::Accept { session_id }
        } else {
            CustomId::Select { session_id }
        })
    }
}
