use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::prompt::PERSONA_INSTRUCTION;

/// Which remote completion service answers chat messages.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Multimodal generative API with a managed, environment-provided key
    Gemini,
    /// OpenAI compatible chat completions with a user-supplied key
    #[value(name = "openai")]
    OpenAi,
}

impl BackendKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" | "open-ai" | "rest" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub backend: BackendKind,
    pub gemini_api_hostname: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_hostname: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub system_message: String,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path =
            env::var("CELORA_STORAGE_PATH").unwrap_or_else(|_| "./.celora".to_string());
        let backend = env::var("CELORA_BACKEND")
            .ok()
            .and_then(|s| {
                let kind = BackendKind::parse(&s);
                if kind.is_none() {
                    tracing::warn!("Ignoring unknown CELORA_BACKEND value: {}", s);
                }
                kind
            })
            .unwrap_or(BackendKind::Gemini);
        let gemini_api_hostname = env::var("CELORA_GEMINI_HOST")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let gemini_api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));
        let gemini_model = env::var("CELORA_GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-3-flash-preview".to_string());
        let openai_api_hostname =
            env::var("CELORA_OPENAI_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        // The stored bring-your-own-key value is merged in later by
        // `with_stored_api_key` since storage isn't open yet
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let openai_model =
            env::var("CELORA_OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let system_message = env::var("CELORA_SYSTEM_MESSAGE")
            .unwrap_or_else(|_| PERSONA_INSTRUCTION.to_string());
        let request_timeout = env::var("CELORA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            storage_path: PathBuf::from(storage_path),
            backend,
            gemini_api_hostname,
            gemini_api_key,
            gemini_model,
            openai_api_hostname,
            openai_api_key,
            openai_model,
            system_message,
            request_timeout,
        }
    }
}

impl AppConfig {
    /// Fill in the bring-your-own-key credential from local storage
    /// unless the environment already provided one.
    pub fn with_stored_api_key(mut self, stored: Option<String>) -> Self {
        if self.openai_api_key.is_none() {
            self.openai_api_key = stored.filter(|k| !k.trim().is_empty());
        }
        self
    }

    /// Whether the selected backend has a credential to send.
    pub fn has_api_key(&self) -> bool {
        match self.backend {
            BackendKind::Gemini => self.gemini_api_key.is_some(),
            BackendKind::OpenAi => self.openai_api_key.is_some(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
