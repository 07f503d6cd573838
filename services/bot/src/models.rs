//! Wire models for the interactions endpoint

pub mod custom_id;
pub mod interaction;
pub mod response;

pub use custom_id::CustomId;
pub use interaction::{Interaction, InteractionData, InteractionType};
pub use response::{Component, InteractionResponse, MessagePayload, SelectOption};
