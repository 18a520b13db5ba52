//! Test utilities for integration tests
use std::sync::Arc;

use tempfile::TempDir;

use celora::ai::{CompletionAdapter, build_backend};
use celora::core::{AppConfig, BackendKind, ManualClock};
use celora::settings::Language;
use celora::state::AppState;

pub const START_MILLIS: i64 = 1_717_000_000_000;

/// App state backed by a fresh temporary directory and a manual
/// clock. Keep the `TempDir` alive for as long as the state is used.
pub fn test_state(config: &AppConfig) -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let state = AppState::open_with_clock(config, clock.clone()).expect("Failed to open state");
    (state, clock)
}

/// Configuration pointing both backends at `api_url` with storage in
/// `dir`.
pub fn test_config(dir: &TempDir, backend: BackendKind, api_url: &str, key: Option<&str>) -> AppConfig {
    AppConfig {
        storage_path: dir.path().to_path_buf(),
        backend,
        gemini_api_hostname: api_url.to_string(),
        gemini_api_key: key.map(str::to_string),
        gemini_model: String::from("gemini-test"),
        openai_api_hostname: api_url.to_string(),
        openai_api_key: key.map(str::to_string),
        openai_model: String::from("gpt-test"),
        system_message: String::from("You are a helpful assistant."),
        request_timeout: None,
    }
}

pub fn test_adapter(config: &AppConfig) -> CompletionAdapter {
    CompletionAdapter::new(build_backend(config), Language::En)
}

pub fn openai_reply(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
