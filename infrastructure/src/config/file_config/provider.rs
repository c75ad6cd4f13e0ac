//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Chat-completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Full URL of the chat-completions endpoint.
    pub base_url: String,
    /// Environment variable holding the bearer token (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Sent as the `HTTP-Referer` attribution header.
    pub referer: String,
    /// Sent as the `X-Title` attribution header.
    pub title: String,
    /// Whole-request timeout in seconds, including the streamed body.
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            referer: "https://github.com/scbenet/ask".to_string(),
            title: "Ask CLI".to_string(),
            timeout_seconds: 360,
        }
    }
}
