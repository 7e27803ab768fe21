pub mod client;
pub mod error;

pub use client::{AnthropicClient, ClientConfig};
pub use error::UpstreamError;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
