//! Domain layer for ask
//!
//! This crate contains the conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation**: an append-only log of role-tagged [`Message`]s
//! - **Snapshot**: an immutable copy of the conversation handed to a transport
//! - **StreamEvent**: `Chunk* (End | Error)` — the typed events of one streamed reply
//! - **SessionState**: `Idle → Requesting → Streaming → Idle`, at most one turn in flight

pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, prompt::Prompt};
pub use session::{
    conversation::{Conversation, Snapshot},
    entities::{Message, Role},
    state::{SessionState, Transition},
    stream::{StreamErrorKind, StreamEvent},
};
