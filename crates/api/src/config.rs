use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub api_url: String,
    /// Never serialized, so the config can be logged as-is.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { port: DEFAULT_PORT },
            upstream: UpstreamConfig {
                api_url: llm::DEFAULT_API_URL.to_string(),
                api_key: None,
                model: llm::DEFAULT_MODEL.to_string(),
                max_tokens: llm::DEFAULT_MAX_TOKENS,
                request_timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, starting from the defaults.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
        }

        config.upstream.api_key = get("ANTHROPIC_API_KEY").or_else(|| get("CLAUDE_API_KEY"));

        if let Some(url) = get("ANTHROPIC_API_URL") {
            config.upstream.api_url = url;
        }
        if let Some(model) = get("ANTHROPIC_MODEL") {
            config.upstream.model = model;
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let timeout: u64 = secs.trim().parse().with_context(|| {
                format!("UPSTREAM_TIMEOUT_SECS must be whole seconds, got {secs:?}")
            })?;
            ensure!(timeout > 0, "UPSTREAM_TIMEOUT_SECS must be at least 1 second");
            config.upstream.request_timeout_secs = timeout;
        }

        Ok(config)
    }

    pub fn client_config(&self) -> llm::ClientConfig {
        llm::ClientConfig {
            api_url: self.upstream.api_url.clone(),
            model: self.upstream.model.clone(),
            max_tokens: self.upstream.max_tokens,
            timeout: Duration::from_secs(self.upstream.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.port, 5001);
        assert!(config.upstream.api_key.is_none());
        assert_eq!(config.upstream.model, "claude-3-opus-20240229");
        assert_eq!(config.upstream.max_tokens, 1024);
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_port_and_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn falls_back_to_legacy_key_name() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "  "),
            ("CLAUDE_API_KEY", "sk-legacy"),
        ]))
        .unwrap();
        assert_eq!(config.upstream.api_key.as_deref(), Some("sk-legacy"));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(AppConfig::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_SECS", "-1")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn reads_timeout() {
        let config = AppConfig::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn serialized_config_hides_key() {
        let config = AppConfig::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "sk-secret")])).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(json.contains("claude-3-opus-20240229"));
    }
}
