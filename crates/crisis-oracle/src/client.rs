//! Oracle contract and the HTTP client for the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OracleError;

/// Default model used for every channel.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Messages API version header value.
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Default bound on a single oracle call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Purpose of a call; selects the token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Order interpretation (structured JSON reply).
    Command,
    /// Adversary responses and suggested options.
    GameMaster,
    /// Next-situation narrative.
    Situation,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Command => "command",
            Channel::GameMaster => "gamemaster",
            Channel::Situation => "situation",
        }
    }
}

/// One prompt for the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub channel: Channel,
    pub prompt: String,
}

impl OracleRequest {
    pub fn new(channel: Channel, prompt: impl Into<String>) -> Self {
        Self {
            channel,
            prompt: prompt.into(),
        }
    }
}

/// An external reasoning service that answers a prompt with text.
///
/// Implementations must be cheap to share; the engine holds them behind `Arc`.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one prompt and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when no usable reply could be obtained.
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError>;
}

/// Stand-in for sessions that never reach the oracle. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineOracle;

#[async_trait]
impl Oracle for OfflineOracle {
    async fn complete(&self, _request: OracleRequest) -> Result<String, OracleError> {
        Err(OracleError::MissingApiKey)
    }
}

/// Settings for [`AnthropicOracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub api_version: String,
    /// Upper bound on one call, covering both the request and the body read.
    pub timeout: Duration,
    pub command_max_tokens: u32,
    pub game_master_max_tokens: u32,
    pub situation_max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            command_max_tokens: 2000,
            game_master_max_tokens: 500,
            situation_max_tokens: 300,
        }
    }
}

impl OracleConfig {
    pub fn max_tokens(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Command => self.command_max_tokens,
            Channel::GameMaster => self.game_master_max_tokens,
            Channel::Situation => self.situation_max_tokens,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Oracle backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl AnthropicOracle {
    /// Build a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MissingApiKey` if no key is configured, or
    /// `OracleError::Transport` if the HTTP client cannot be built.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        if config.api_key.trim().is_empty() {
            return Err(OracleError::MissingApiKey);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }
}

#[async_trait]
impl Oracle for AnthropicOracle {
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens(request.channel),
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!(
            channel = request.channel.as_str(),
            max_tokens = body.max_tokens,
            "sending oracle request"
        );

        let send = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.config.timeout, send)
            .await
            .map_err(|_| OracleError::Timeout(self.config.timeout))?
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = tokio::time::timeout(self.config.timeout, response.bytes())
            .await
            .map_err(|_| OracleError::Timeout(self.config.timeout))?
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            warn!(
                channel = request.channel.as_str(),
                status = status.as_u16(),
                "oracle returned error status"
            );
            return Err(OracleError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_slice(&bytes).map_err(|e| OracleError::Malformed(e.to_string()))?;
        first_text(parsed)
    }
}

fn first_text(response: MessagesResponse) -> Result<String, OracleError> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| OracleError::Malformed("reply contained no text block".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let result = AnthropicOracle::new(OracleConfig::default());
        assert!(matches!(result, Err(OracleError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_offline_oracle_always_fails() {
        let result = OfflineOracle
            .complete(OracleRequest::new(Channel::Situation, "anything"))
            .await;
        assert!(matches!(result, Err(OracleError::MissingApiKey)));
    }

    #[test]
    fn test_max_tokens_per_channel() {
        let config = OracleConfig::default();
        assert_eq!(config.max_tokens(Channel::Command), 2000);
        assert_eq!(config.max_tokens(Channel::GameMaster), 500);
        assert_eq!(config.max_tokens(Channel::Situation), 300);
    }

    #[test]
    fn test_messages_url_ignores_trailing_slash() {
        let config = OracleConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.messages_url(), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_first_text_block_is_used() {
        let json = r#"{"content": [
            {"type": "thinking", "thinking": "..."},
            {"type": "text", "text": "Forces hold position."}
        ]}"#;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_text(parsed).unwrap(), "Forces hold position.");
    }

    #[test]
    fn test_reply_without_text_is_malformed() {
        let parsed: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(first_text(parsed), Err(OracleError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let oracle = AnthropicOracle::new(OracleConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap();
        let result = oracle
            .complete(OracleRequest::new(Channel::GameMaster, "status?"))
            .await;
        assert!(matches!(
            result,
            Err(OracleError::Transport(_) | OracleError::Timeout(_))
        ));
    }
}
