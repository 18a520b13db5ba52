//! Gemini `generateContent` REST API.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::completion::{CompletionBackend, CompletionError, http_client};
use crate::ai::prompt::TEMPERATURE;
use crate::chat::{self, Message};

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn role_name(role: chat::Role) -> &'static str {
    match role {
        chat::Role::User => "user",
        chat::Role::Model => "model",
    }
}

/// Build the request body for `history` followed by `prompt`.
pub fn build_request(
    system_message: &str,
    history: &[Message],
    prompt: &str,
) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|msg| Content {
            role: role_name(msg.role).to_string(),
            parts: vec![Part {
                text: msg.text.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: String::from("user"),
        parts: vec![Part {
            text: prompt.to_string(),
        }],
    });

    let system_instruction = (!system_message.is_empty()).then(|| SystemInstruction {
        parts: vec![Part {
            text: system_message.to_string(),
        }],
    });

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
        },
    }
}

// Text of the first candidate, joining its parts the way the SDK's
// `.text` accessor does
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates?.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()?
        .error
        .message
        .filter(|m| !m.trim().is_empty())
}

/// Gemini backend using a managed key provided by the environment.
pub struct GeminiBackend {
    client: Client,
    api_hostname: String,
    api_key: Option<String>,
    model: String,
    system_message: String,
}

impl GeminiBackend {
    pub fn new(
        api_hostname: &str,
        api_key: Option<&str>,
        model: &str,
        system_message: &str,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client: http_client(timeout),
            api_hostname: api_hostname.to_string(),
            api_key: api_key.map(str::to_string),
            model: model.to_string(),
            system_message: system_message.to_string(),
        }
    }

    async fn generate_content(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, CompletionError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_hostname.trim_end_matches("/"),
            self.model
        );
        // The key goes in a header so it never shows up in logged URLs
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
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

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed).ok_or(CompletionError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    async fn complete(&self, prompt: &str, history: &[Message]) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let request = build_request(&self.system_message, history, prompt);
        tracing::debug!(
            "Requesting content from {} with {} turns",
            self.model,
            request.contents.len()
        );
        self.generate_content(api_key, &request).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
