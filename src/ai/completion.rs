//! The single entry point for getting a reply from an LLM, regardless
//! of which remote service is configured.
//!
//! Backends implement [`CompletionBackend`] and report failures as a
//! typed [`CompletionError`]. [`CompletionAdapter`] wraps a backend
//! and turns every outcome into text that can be shown in the chat as
//! if the model had said it, so callers never handle errors.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::chat::Message;
use crate::core::config::{AppConfig, BackendKind};
use crate::google::GeminiBackend;
use crate::openai::OpenAiBackend;
use crate::settings::{Language, Translations};

const GENERIC_FAILURE: &str = "Unable to get response from CeloraAI";

#[derive(Debug, Error)]
pub enum CompletionError {
    /// No managed credential in the environment. Detected before any
    /// request is made.
    #[error("API key is not configured")]
    MissingApiKey,
    /// No bring-your-own key stored or set in the environment
    #[error("API key is not set")]
    MissingUserApiKey,
    /// The service answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never completed
    #[error("{0}")]
    Transport(String),
    /// The service answered but the body was not what was expected
    #[error("{0}")]
    MalformedResponse(String),
    /// The service answered successfully without any text
    #[error("empty response")]
    EmptyResponse,
}

// reqwest's Display omits the underlying cause, it lives in the source chain
impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        let is_timeout = e.is_timeout();
        let is_decode = e.is_decode();
        let chain = format!("{:#}", anyhow::Error::from(e));
        if is_timeout {
            CompletionError::Transport(format!("Request timeout: {}", chain))
        } else if is_decode {
            CompletionError::MalformedResponse(chain)
        } else {
            CompletionError::Transport(chain)
        }
    }
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `history` followed by `prompt` as the newest user turn and
    /// return the reply text.
    async fn complete(&self, prompt: &str, history: &[Message]) -> Result<String, CompletionError>;

    fn name(&self) -> &str;
}

pub type BoxedBackend = Box<dyn CompletionBackend>;

pub struct CompletionAdapter {
    backend: BoxedBackend,
    language: Language,
}

impl CompletionAdapter {
    pub fn new(backend: BoxedBackend, language: Language) -> Self {
        Self { backend, language }
    }

    pub fn from_config(config: &AppConfig, language: Language) -> Self {
        Self::new(build_backend(config), language)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Language used for the fixed replies (missing key, no response).
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Get the reply to `prompt` given the prior `history`. Always
    /// resolves to displayable text: the model's reply, a fixed
    /// message when nothing was generated or no key is configured, or
    /// `"Error: ..."` describing the failure.
    pub async fn send_completion(&self, prompt: &str, history: &[Message]) -> String {
        let result = self.backend.complete(prompt, history).await;
        reply_text(result, Translations::for_language(self.language))
    }
}

/// Convert a backend result into the text shown in the chat.
pub fn reply_text(result: Result<String, CompletionError>, t: &Translations) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(CompletionError::EmptyResponse) => t.no_response.to_string(),
        Err(CompletionError::MissingApiKey) => {
            tracing::error!("Completion API key is missing");
            t.api_key_missing.to_string()
        }
        Err(CompletionError::MissingUserApiKey) => {
            tracing::error!("No API key stored for the bring-your-own-key backend");
            t.user_api_key_missing.to_string()
        }
        Err(e) => {
            tracing::error!("Completion failed: {:?}", e);
            let diagnostic = e.to_string();
            if diagnostic.trim().is_empty() {
                format!("Error: {}", GENERIC_FAILURE)
            } else {
                format!("Error: {}", diagnostic)
            }
        }
    }
}

/// Build the backend selected by `config`.
pub fn build_backend(config: &AppConfig) -> BoxedBackend {
    tracing::debug!("Using {:?} completion backend", config.backend);
    match config.backend {
        BackendKind::Gemini => Box::new(GeminiBackend::new(
            &config.gemini_api_hostname,
            config.gemini_api_key.as_deref(),
            &config.gemini_model,
            &config.system_message,
            config.request_timeout,
        )),
        BackendKind::OpenAi => Box::new(OpenAiBackend::new(
            &config.openai_api_hostname,
            config.openai_api_key.as_deref(),
            &config.openai_model,
            &config.system_message,
            config.request_timeout,
        )),
    }
}

/// HTTP client shared by the backends. Without a timeout the
/// transport default applies.
pub fn http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        reqwest::Client::new()
    })
}
