//! Model value object representing a provider model identifier

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Models offered by default, in picker order.
const CATALOGUE: &[&str] = &[
    "google/gemini-2.5-flash-preview",
    "google/gemini-2.5-pro-preview",
    "openai/o4-mini-high",
    "openai/o3",
    "openai/gpt-4.1",
    "deepseek/deepseek-chat-v3-0324",
    "microsoft/mai-ds-r1:free",
    "anthropic/claude-3.7-sonnet",
    "anthropic/claude-3.7-sonnet:thinking",
];

/// An LLM model identifier (Value Object)
///
/// The identifier is passed through to the completion endpoint unchanged
/// (e.g. `openai/gpt-4.1`), so any non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    /// Create a model from an identifier, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModel(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in model catalogue shown by the model picker
    pub fn catalogue() -> Vec<Model> {
        CATALOGUE.iter().map(|id| Model(id.to_string())).collect()
    }

    /// Provider prefix of the identifier (`openai` for `openai/gpt-4.1`)
    pub fn vendor(&self) -> Option<&str> {
        self.0.split_once('/').map(|(vendor, _)| vendor)
    }
}

impl Default for Model {
    /// Returns the first catalogue entry
    fn default() -> Self {
        Model(CATALOGUE[0].to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
