use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::CompletionError;
use crate::ai::prompt::{MAX_TOKENS, TEMPERATURE};
use crate::chat;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

impl From<chat::Role> for Role {
    fn from(role: chat::Role) -> Self {
        match role {
            chat::Role::User => Role::User,
            chat::Role::Model => Role::Assistant,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

impl From<&chat::Message> for Message {
    fn from(msg: &chat::Message) -> Self {
        Message::new(msg.role.into(), &msg.text)
    }
}

/// Build the transcript sent to the API: system message, prior
/// history, then `prompt` as the final user turn.
pub fn transcript(system_message: &str, history: &[chat::Message], prompt: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::new(Role::System, system_message));
    messages.extend(history.iter().map(Message::from));
    messages.push(Message::new(Role::User, prompt));
    messages
}

// Error bodies look like:
// {"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

pub async fn completion(
    client: &Client,
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, CompletionError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = api_error_message(&body).unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )
        });
        return Err(CompletionError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.json().await?;
    Ok(body)
}
