use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::ChatConfig;

const DEFAULT_CHAT_API_URL: &str = "https://api.psnext.info/api/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if `CHAT_API_TOKEN` is missing.
#[derive(Clone)]
pub struct Config {
    pub chat_api_url: String,
    pub chat_api_token: String,
    pub chat_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            chat_api_url: std::env::var("CHAT_API_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_API_URL.to_string()),
            chat_api_token: require_env("CHAT_API_TOKEN")?,
            chat_timeout_secs: parse_env("CHAT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Settings handed to the chat client at construction.
    pub fn chat(&self) -> ChatConfig {
        ChatConfig {
            api_url: self.chat_api_url.clone(),
            token: self.chat_api_token.clone(),
            timeout: Duration::from_secs(self.chat_timeout_secs),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("chat_api_url", &self.chat_api_url)
            .field("chat_api_token", &"<redacted>")
            .field("chat_timeout_secs", &self.chat_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            chat_api_url: "http://localhost:9000/api/chat".to_string(),
            chat_api_token: "secret-token".to_string(),
            chat_timeout_secs: 30,
            max_upload_bytes: 1024,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_chat_config_carries_endpoint_token_and_timeout() {
        let chat = sample().chat();
        assert_eq!(chat.api_url, "http://localhost:9000/api/chat");
        assert_eq!(chat.token, "secret-token");
        assert_eq!(chat.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u64 = parse_env("CAREERQGEN_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
