//! The core models for managing chat sessions with an LLM.
use serde::{Deserialize, Serialize};

/// Maximum number of characters of the first message used as a
/// session title.
pub const TITLE_MAX_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, text: &str, timestamp: i64) -> Self {
        Self {
            role,
            text: text.to_string(),
            timestamp,
        }
    }

    pub fn user(text: &str, timestamp: i64) -> Self {
        Self::new(Role::User, text, timestamp)
    }

    pub fn model(text: &str, timestamp: i64) -> Self {
        Self::new(Role::Model, text, timestamp)
    }
}

pub type SessionId = String;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub messages: Vec<Message>,
    /// Last mutation time in milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl ChatSession {
    /// Text of the most recent message, used as a preview in listings.
    pub fn preview(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }
}

/// Display title for a session holding `messages`. Sessions with
/// messages are titled by the first message's text, cut to
/// `TITLE_MAX_CHARS` characters with an ellipsis when it was longer.
/// Empty sessions keep `existing`.
pub fn derive_title(existing: &str, messages: &[Message]) -> String {
    let Some(first) = messages.first() else {
        return existing.to_string();
    };

    let mut chars = first.text.char_indices();
    match chars.nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &first.text[..cut], TITLE_ELLIPSIS),
        None => first.text.clone(),
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}
