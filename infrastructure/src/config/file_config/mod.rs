//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where appropriate.

mod models;
mod output;
mod provider;

pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;

use ask_application::StreamPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("provider.api_key_env cannot be empty")]
    EmptyApiKeyEnv,

    #[error("models.available cannot be empty")]
    NoModels,

    #[error("model name cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint and credential settings
    pub provider: FileProviderConfig,
    /// Default and selectable models
    pub models: FileModelsConfig,
    /// Stream decoding policy
    pub stream: StreamPolicy,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }
        self.models.parse_available()?;
        self.models.parse_default()?;
        Ok(())
    }
}
