//! Outbound interaction responses and message components

use serde::Serialize;

/// Message flag hiding a message from everyone but the invoker
pub const EPHEMERAL: u64 = 1 << 6;

/// Kind of interaction response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ResponseType {
    Pong,
    ChannelMessageWithSource,
}

impl From<ResponseType> for u8 {
    fn from(value: ResponseType) -> Self {
        match value {
            ResponseType::Pong => 1,
            ResponseType::ChannelMessageWithSource => 4,
        }
    }
}

/// Body returned synchronously to an interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessagePayload>,
}

impl InteractionResponse {
    /// Answer to a PING
    pub fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// Post `message` in the channel the interaction came from
    pub fn message(message: MessagePayload) -> Self {
        Self {
            kind: ResponseType::ChannelMessageWithSource,
            data: Some(message),
        }
    }
}

/// Message content, flags and components
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// `Some(vec![])` clears the components of an edited message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or(0) | EPHEMERAL);
        self
    }

    #[cfg(test)]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|flags| flags & EPHEMERAL != 0)
    }
}

/// Kind of message component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ComponentType {
    ActionRow,
    Button,
    StringSelect,
}

impl From<ComponentType> for u8 {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
            ComponentType::StringSelect => 3,
        }
    }
}

/// Interactive element attached to a message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    StringSelect(StringSelect),
}

impl Component {
    /// Action row holding a single component
    pub fn row(component: Component) -> Self {
        Component::ActionRow(ActionRow {
            kind: ComponentType::ActionRow,
            components: vec![component],
        })
    }

    /// Primary button
    pub fn button(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Component::Button(Button {
            kind: ComponentType::Button,
            custom_id: custom_id.into(),
            label: label.into(),
            style: PRIMARY_BUTTON,
        })
    }

    /// String select menu
    pub fn select(custom_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Component::StringSelect(StringSelect {
            kind: ComponentType::StringSelect,
            custom_id: custom_id.into(),
            options,
        })
    }
}

const PRIMARY_BUTTON: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    pub label: String,
    pub style: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringSelect {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub custom_id: String,
    pub options: Vec<SelectOption>,
}

/// Entry of a select menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pong_serialization() {
        let value = serde_json::to_value(InteractionResponse::pong()).expect("serializable");
        assert_eq!(value, json!({ "type": 1 }));
    }

    #[test]
    fn test_ephemeral_select_serialization() {
        let message = MessagePayload::text("Pick one")
            .ephemeral()
            .with_components(vec![Component::row(Component::select(
                "select_choice_1",
                vec![SelectOption::new("Rock", "rock")],
            ))]);
        let value =
            serde_json::to_value(InteractionResponse::message(message)).expect("serializable");

        assert_eq!(
            value,
            json!({
                "type": 4,
                "data": {
                    "content": "Pick one",
                    "flags": 64,
                    "components": [{
                        "type": 1,
                        "components": [{
                            "type": 3,
                            "custom_id": "select_choice_1",
                            "options": [{ "label": "Rock", "value": "rock" }]
                        }]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_cleared_components_serialize_as_empty_list() {
        let message = MessagePayload::text("done").with_components(vec![]);
        let value = serde_json::to_value(&message).expect("serializable");
        assert_eq!(value, json!({ "content": "done", "components": [] }));
        assert!(!message.is_ephemeral());
    }
}
