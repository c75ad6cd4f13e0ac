//! Wire types for the OpenAI-compatible chat-completions API.
//!
//! Only the fields this client reads are modelled; everything else in a
//! response is ignored by serde.

use ask_domain::Message;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for both the streaming and the non-streaming variant
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

/// Provider-reported error object
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// One `data:` payload of a streamed reply
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<StreamChoice>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

impl StreamChunk {
    /// Text carried by the first choice, if any and non-empty
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|text| !text.is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }
}

/// Body of a non-streaming reply
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<CompletionChoice>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: CompletionMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}
