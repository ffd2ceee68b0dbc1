use serde::{Deserialize, Serialize};

/// Button identifiers shared with the chat transport.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    BeginNewQuery,
    ReuseSaved,
    Save,
    DontSave,
    Cancel,
    ReturnToMenu,
}

impl Button {
    pub fn id(self) -> &'static str {
        match self {
            Button::BeginNewQuery => "begin_new_query",
            Button::ReuseSaved => "reuse_saved",
            Button::Save => "save",
            Button::DontSave => "dont_save",
            Button::Cancel => "cancel",
            Button::ReturnToMenu => "return_to_menu",
        }
    }

    pub fn from_id(id: &str) -> Option<Button> {
        match id {
            "begin_new_query" => Some(Button::BeginNewQuery),
            "reuse_saved" => Some(Button::ReuseSaved),
            "save" => Some(Button::Save),
            "dont_save" => Some(Button::DontSave),
            "cancel" => Some(Button::Cancel),
            "return_to_menu" => Some(Button::ReturnToMenu),
            _ => None,
        }
    }
}

/// Everything a user can do, whether typed or pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Text(String),
    Press(Button),
}

impl Interaction {
    /// Typed text; `/start` and `/cancel` become their button equivalents.
    pub fn from_text(text: &str) -> Interaction {
        match text.trim() {
            "/start" | "/menu" => Interaction::Press(Button::ReturnToMenu),
            "/cancel" => Interaction::Press(Button::Cancel),
            _ => Interaction::Text(text.to_string()),
        }
    }
}

/// Outbound message for the transport: plain text plus offered buttons.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Button>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(mut self, buttons: &[Button]) -> Self {
        self.buttons = buttons.to_vec();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_ids_round_trip() {
        for b in [
            Button::BeginNewQuery,
            Button::ReuseSaved,
            Button::Save,
            Button::DontSave,
            Button::Cancel,
            Button::ReturnToMenu,
        ] {
            assert_eq!(Button::from_id(b.id()), Some(b));
            assert_eq!(serde_json::to_value(b).unwrap(), b.id());
        }
        assert_eq!(Button::from_id("search_saved"), None);
    }

    #[test]
    fn slash_commands_map_to_buttons() {
        assert_eq!(
            Interaction::from_text("/cancel"),
            Interaction::Press(Button::Cancel)
        );
        assert_eq!(
            Interaction::from_text(" /start "),
            Interaction::Press(Button::ReturnToMenu)
        );
        assert_eq!(
            Interaction::from_text("Павло"),
            Interaction::Text("Павло".into())
        );
    }
}
