//! OpenAI-compatible chat-completions client.
//!
//! Sends a single-turn completion request to a configured endpoint with a
//! bearer credential and extracts `choices[0].message.content` from the
//! response. One attempt per call, bounded by the configured timeout.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the Authorization header.

use std::time::Duration;

use chatgate_core::model::CompletionClient;
use chatgate_types::config::ModelConfig;
use chatgate_types::error::ModelError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Reqwest-backed implementation of `CompletionClient` for any
/// OpenAI-compatible chat-completions endpoint (Together AI by default).
///
/// Does NOT derive Debug to prevent accidental exposure of the API key.
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    api_key: SecretString,
    api_url: String,
    model: String,
}

impl OpenAiCompatClient {
    /// Build a client from the provider settings.
    pub fn new(config: &ModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 1],
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Pull the reply text out of a provider response body.
fn extract_reply(body: &str) -> Result<String, ModelError> {
    let parsed: CompletionsResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::Malformed(format!("unparseable response body: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| ModelError::Malformed("missing choices[0].message.content".to_string()))
}

impl CompletionClient for OpenAiCompatClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let body = CompletionsRequest {
            model: &self.model,
            messages: [WireMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(url = %self.api_url, model = %self.model, "completion request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Logged once by the orchestrator when it swallows the error.
            let error_body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        extract_reply(&text)
    }
}
