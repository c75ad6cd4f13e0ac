//! OpenRouter adapter
//!
//! Implements [`StreamTransport`](ask_application::StreamTransport) for any
//! OpenAI-compatible chat-completions endpoint.
//!
//! - [`protocol`] — request and response wire types
//! - [`sse`] — line decoder and body pump for streamed replies
//! - [`transport`] — the reqwest-based adapter and its credential

pub mod error;
pub mod protocol;
pub mod sse;
pub mod transport;
