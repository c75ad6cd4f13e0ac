//! Model configuration from TOML (`[models]` section)

use super::ConfigValidationError;
use ask_domain::Model;
use serde::{Deserialize, Serialize};

/// Model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// default = "openai/gpt-4.1"
/// available = ["openai/gpt-4.1", "anthropic/claude-3.7-sonnet"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model used for the first turn (first available model when unset)
    pub default: Option<String>,
    /// Models offered by the model picker
    pub available: Vec<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            default: None,
            available: Model::catalogue()
                .into_iter()
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }
}

impl FileModelsConfig {
    /// Parse the `available` list in order.
    pub fn parse_available(&self) -> Result<Vec<Model>, ConfigValidationError> {
        if self.available.is_empty() {
            return Err(ConfigValidationError::NoModels);
        }
        self.available.iter().map(|s| parse_model(s)).collect()
    }

    /// The model for the first turn.
    pub fn parse_default(&self) -> Result<Model, ConfigValidationError> {
        match &self.default {
            Some(name) => parse_model(name),
            None => self
                .parse_available()?
                .into_iter()
                .next()
                .ok_or(ConfigValidationError::NoModels),
        }
    }
}

fn parse_model(name: &str) -> Result<Model, ConfigValidationError> {
    Model::new(name).map_err(|_| ConfigValidationError::EmptyModelName)
}
