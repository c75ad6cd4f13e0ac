//! Prompt value object

use super::error::DomainError;

/// A prompt typed by the user (Value Object)
///
/// The content is kept verbatim; only blank input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Try to create a new prompt, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyPrompt)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
