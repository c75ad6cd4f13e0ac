//! Application layer for ask
//!
//! This crate contains the session controller use case, the ports it drives,
//! and the stream policy shared with transport adapters.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::StreamPolicy;
pub use ports::{
    stream_transport::{GatewayError, StreamHandle, StreamSink, StreamTransport, stream_channel},
    ui_event::UiEvent,
};
pub use use_cases::session_controller::{SendRejected, SessionController, TurnOutcome};
