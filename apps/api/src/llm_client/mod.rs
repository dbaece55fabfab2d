/// Chat client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the chat API directly.
/// All evaluation and generation requests MUST go through `ChatCompletion`.
///
/// Model: gpt35turbo (hardcoded — do not make configurable to prevent drift)
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for every chat call.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt35turbo";

const ASSISTANT_ROLE: &str = "assistant";

#[derive(Debug, Error)]
pub enum ChatError {
    /// Upstream answered with a non-success status.
    #[error("chat API returned status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("no assistant message found in the chat API response")]
    NoAssistantMessage,

    #[error("assistant message had no content")]
    EmptyContent,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Endpoint and credentials for the chat API. Built from `Config::chat()`.
#[derive(Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    options: ChatOptions<'a>,
}

#[derive(Debug, Serialize)]
struct ChatOptions<'a> {
    model: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub data: ChatData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatData {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first message attributed to the assistant.
    pub fn assistant_reply(&self) -> Result<&str, ChatError> {
        let message = self
            .data
            .messages
            .iter()
            .find(|m| m.role == ASSISTANT_ROLE)
            .ok_or(ChatError::NoAssistantMessage)?;

        message.content.as_deref().ok_or(ChatError::EmptyContent)
    }
}

/// Seam between the evaluation pipeline and the remote chat API.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletion>` so handlers can be
/// exercised against a stub.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends one prompt and returns the raw assistant reply.
    async fn complete(&self, message: &str) -> Result<String, ChatError>;
}

/// reqwest-backed client for the chat API.
/// Exactly one request per call; failures are returned, never retried.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let request_body = ChatRequest {
            message,
            options: ChatOptions { model: MODEL },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!("Chat API returned {}: {}", status, body);
            return Err(ChatError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let reply = parsed.assistant_reply()?;

        debug!(
            "Chat call succeeded: prompt_chars={}, reply_chars={}",
            message.len(),
            reply.len()
        );

        Ok(reply.to_string())
    }
}
