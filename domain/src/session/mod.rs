//! Conversation session domain.
//!
//! - [`entities::Message`] — a single role-tagged message
//! - [`conversation::Conversation`] — the append-only message log and its [`conversation::Snapshot`]s
//! - [`stream::StreamEvent`] — typed events of one streamed reply
//! - [`state::SessionState`] — the single-flight turn state machine

pub mod conversation;
pub mod entities;
pub mod state;
pub mod stream;
