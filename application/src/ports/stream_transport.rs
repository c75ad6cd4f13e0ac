//! Stream transport port
//!
//! Defines how the application layer obtains a completion from an LLM
//! endpoint, either as a live event stream or as a single response.

use ask_domain::{Model, Snapshot, StreamErrorKind, StreamEvent};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during transport operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("API request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Error reading stream: {0}")]
    StreamRead(String),

    #[error("No response choices returned")]
    EmptyResponse,
}

impl GatewayError {
    /// Stream error classification for this failure
    pub fn kind(&self) -> StreamErrorKind {
        match self {
            GatewayError::Transport(_) => StreamErrorKind::Transport,
            GatewayError::HttpStatus { .. } => StreamErrorKind::HttpStatus,
            GatewayError::Decode(_) | GatewayError::EmptyResponse => StreamErrorKind::Decode,
            GatewayError::Api(_) => StreamErrorKind::Api,
            GatewayError::StreamRead(_) => StreamErrorKind::StreamRead,
        }
    }

    /// Cause text carried by the terminal `Error` event
    ///
    /// Provider-reported messages are passed through verbatim.
    pub fn cause(&self) -> String {
        match self {
            GatewayError::Api(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GatewayError> for StreamEvent {
    fn from(error: GatewayError) -> Self {
        StreamEvent::error(error.kind(), error.cause())
    }
}

/// Create the single-reader channel for one stream.
pub fn stream_channel(capacity: usize) -> (StreamSink, StreamHandle) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (StreamSink { tx }, StreamHandle::new(rx))
}

/// Producer half of a stream.
///
/// The terminal methods consume the sink, so the channel is closed exactly
/// once, right after the terminal event was handed over.
#[derive(Debug)]
pub struct StreamSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl StreamSink {
    /// Deliver a chunk. Returns `false` once the consumer has gone away.
    pub async fn chunk(&self, text: impl Into<String>) -> bool {
        self.tx.send(StreamEvent::Chunk(text.into())).await.is_ok()
    }

    /// Finish the stream successfully.
    pub async fn end(self, full_text: impl Into<String>) {
        let _ = self.tx.send(StreamEvent::End(full_text.into())).await;
    }

    /// Finish the stream with a failure.
    pub async fn fail(self, kind: StreamErrorKind, cause: impl Into<String>) {
        let _ = self.tx.send(StreamEvent::error(kind, cause)).await;
    }

    /// Finish the stream with a gateway error.
    pub async fn fail_with(self, error: GatewayError) {
        let _ = self.tx.send(error.into()).await;
    }

    /// Close the stream without a terminal event.
    pub fn abandon(self) {}

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Handle for receiving streaming events from a transport.
///
/// Closure of the underlying channel is the completion signal.
#[derive(Debug)]
pub struct StreamHandle {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or `None` once the producer closed the stream.
    ///
    /// Cancel-safe, so it can be raced inside `tokio::select!`.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// Transport to a chat-completions endpoint
///
/// Implementations (adapters) live in the infrastructure layer. They only
/// read the snapshot; the conversation itself is never handed out.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Start streaming a reply for `snapshot`.
    ///
    /// Returns immediately; a producer task delivers `Chunk* (End | Error)`
    /// and then closes the handle.
    fn start_stream(&self, model: &Model, snapshot: Snapshot) -> StreamHandle;

    /// Request a reply without streaming.
    async fn complete(&self, model: &Model, snapshot: Snapshot) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_cause_is_verbatim() {
        let event: StreamEvent = GatewayError::Api("rate limited".to_string()).into();
        assert_eq!(
            event,
            StreamEvent::error(StreamErrorKind::Api, "rate limited")
        );
    }

    #[test]
    fn http_status_error_keeps_body() {
        let error = GatewayError::HttpStatus {
            status: 401,
            body: "{\"error\":\"bad key\"}".to_string(),
        };
        assert_eq!(error.kind(), StreamErrorKind::HttpStatus);
        assert!(error.cause().contains("401"));
        assert!(error.cause().contains("bad key"));
    }

    #[tokio::test]
    async fn sink_closes_channel_after_terminal_event() {
        let (sink, mut handle) = stream_channel(4);
        assert!(sink.chunk("Hel").await);
        assert!(sink.chunk("lo").await);
        sink.end("Hello").await;

        assert_eq!(handle.recv().await, Some(StreamEvent::Chunk("Hel".into())));
        assert_eq!(handle.recv().await, Some(StreamEvent::Chunk("lo".into())));
        assert_eq!(handle.recv().await, Some(StreamEvent::End("Hello".into())));
        assert_eq!(handle.recv().await, None);
    }

    #[tokio::test]
    async fn chunk_reports_dropped_consumer() {
        let (sink, handle) = stream_channel(1);
        drop(handle);
        assert!(sink.is_closed());
        assert!(!sink.chunk("ignored").await);
    }
}
