use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ai::completion::{CompletionBackend, CompletionError, http_client};
use crate::chat::Message;
use crate::openai::{completion, transcript};

/// Chat completions against an OpenAI compatible API using a key the
/// user supplied.
pub struct OpenAiBackend {
    client: Client,
    api_hostname: String,
    api_key: Option<String>,
    model: String,
    system_message: String,
}

impl OpenAiBackend {
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
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str, history: &[Message]) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingUserApiKey)?;

        let messages = transcript(&self.system_message, history, prompt);
        tracing::debug!(
            "Requesting chat completion from {} with {} messages",
            self.model,
            messages.len()
        );
        let resp = completion(
            &self.client,
            &messages,
            &self.api_hostname,
            api_key,
            &self.model,
        )
        .await?;

        if resp["choices"].as_array().is_none() {
            return Err(CompletionError::MalformedResponse(format!(
                "Missing choices in response: {}",
                resp
            )));
        }

        match resp["choices"][0]["message"]["content"].as_str() {
            Some(msg) if !msg.is_empty() => Ok(msg.to_string()),
            _ => Err(CompletionError::EmptyResponse),
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(url: &str, key: Option<&str>) -> OpenAiBackend {
        OpenAiBackend::new(url, key, "gpt-4o-mini", "You are a helpful assistant.", None)
    }

    #[tokio::test]
    async fn test_complete_returns_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::PartialJson(json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "earlier"},
                    {"role": "assistant", "content": "reply"},
                    {"role": "user", "content": "Hi"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}}]}"#)
            .create();

        let history = vec![Message::user("earlier", 1), Message::model("reply", 2)];
        let result = backend(&server.url(), Some("test-key"))
            .complete("Hi", &history)
            .await;

        mock.assert();
        assert_eq!(result.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create();

        let result = backend(&server.url(), None).complete("Hi", &[]).await;

        mock.assert();
        assert!(matches!(result, Err(CompletionError::MissingUserApiKey)));
    }

    #[tokio::test]
    async fn test_null_content_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]}"#)
            .create();

        let result = backend(&server.url(), Some("k")).complete("Hi", &[]).await;
        assert!(matches!(result, Err(CompletionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("this is not json")
            .create();

        let result = backend(&server.url(), Some("k")).complete("Hi", &[]).await;
        assert!(matches!(result, Err(CompletionError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Nothing listens on port 9 (discard) on loopback in CI
        let result = backend("http://127.0.0.1:9", Some("k")).complete("Hi", &[]).await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }
}
