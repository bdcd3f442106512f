//! Anthropic Messages API client.

use super::TextAnalysis;
use crate::error::{AuditError, Result, SourceErrorKind};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for AnthropicClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.anthropic.com".to_string(),
            api_key: String::new(),
            model: crate::config::DEFAULT_LLM_MODEL.to_string(),
            max_tokens: 400,
            timeout: Duration::from_secs(15),
        }
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

impl MessagesResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .content
            .into_iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text)
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

pub struct AnthropicClient {
    client: Client,
    config: AnthropicClientConfig,
}

fn network_error(msg: &str, err: &reqwest::Error) -> AuditError {
    AuditError::source(msg, SourceErrorKind::NetworkError(err.to_string()))
}

impl AnthropicClient {
    pub fn new(config: AnthropicClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AuditError::source(
                "LLM client",
                SourceErrorKind::MissingCredentials("Anthropic".to_string()),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;
        Ok(Self { client, config })
    }

    /// Send a single-turn prompt.
    pub fn message(&self, prompt: &str) -> Result<Option<String>> {
        let url = format!("{}/v1/messages", self.config.api_base);
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .map_err(|e| network_error("LLM request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuditError::api_status(
                "LLM messages",
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        let parsed: MessagesResponse = response.json().map_err(|e| {
            AuditError::source("LLM response", SourceErrorKind::InvalidResponse(e.to_string()))
        })?;
        Ok(parsed.text())
    }
}

impl TextAnalysis for AnthropicClient {
    fn complete(&self, prompt: &str) -> Option<String> {
        match self.message(prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("LLM unavailable: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_text_blocks() {
        let parsed: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","content":[{"type":"text","text":" Add a booking button "},{"type":"tool_use","id":"t"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Add a booking button"));
    }

    #[test]
    fn test_empty_response_is_none() {
        let parsed: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(parsed.text(), None);
    }

    #[test]
    fn test_request_shape() {
        let request = MessagesRequest {
            model: "m",
            max_tokens: 10,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }
}
