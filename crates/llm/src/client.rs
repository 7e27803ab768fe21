use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::UpstreamError;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: crate::DEFAULT_API_URL.to_string(),
            model: crate::DEFAULT_MODEL.to_string(),
            max_tokens: crate::DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the Anthropic Messages API.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct AnthropicClient {
    config: ClientConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// Blocks and usage stay loosely typed: one odd block must not hide a later
// text block.
#[derive(Deserialize)]
struct MessagesResponse {
    content: Option<Vec<Value>>,
    usage: Option<Value>,
}

impl AnthropicClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    /// Send `prompt` as a single user message and return the first text block.
    ///
    /// Exactly one request is made; there is no retry. Any status other than
    /// 200 is a failure.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, UpstreamError> {
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
            .post(&self.config.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", crate::API_VERSION)
            .header("content-type", "application/json")
            .header("anthropic-dangerous-direct-browser-access", "true")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(UpstreamError::Status { status, body });
        }

        extract_text(&body)
    }
}

fn extract_text(body: &str) -> Result<String, UpstreamError> {
    let parsed: MessagesResponse = serde_json::from_str(body)?;

    if let Some(usage) = &parsed.usage {
        debug!(
            input_tokens = usage.get("input_tokens").and_then(serde_json::Value::as_u64),
            output_tokens = usage.get("output_tokens").and_then(serde_json::Value::as_u64),
            "Model token usage"
        );
    }

    parsed
        .content
        .unwrap_or_default()
        .iter()
        .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(UpstreamError::NoText)
}
