//! Streaming events for one conversation turn.
//!
//! [`StreamEvent`] represents individual events in a streaming LLM response,
//! enabling real-time display of model output as it's generated.
//!
//! A stream is `Chunk*` followed by exactly one terminal event
//! (`End` or `Error`). The concatenation of every `Chunk` equals `End`'s text.

/// Classification of a stream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamErrorKind {
    /// Connection, TLS or timeout failure before or while sending the request.
    Transport,
    /// The endpoint answered with a non-success status.
    HttpStatus,
    /// A `data:` payload could not be decoded.
    Decode,
    /// The provider reported an error inside the stream.
    Api,
    /// Reading the response body failed mid-stream.
    StreamRead,
}

impl StreamErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamErrorKind::Transport => "transport",
            StreamErrorKind::HttpStatus => "http-status",
            StreamErrorKind::Decode => "decode",
            StreamErrorKind::Api => "api",
            StreamErrorKind::StreamRead => "stream-read",
        }
    }
}

impl std::fmt::Display for StreamErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event in a streaming LLM response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental text fragment.
    Chunk(String),
    /// The complete response text (signals stream end).
    End(String),
    /// A failure that terminated the stream.
    Error {
        cause: String,
        kind: StreamErrorKind,
    },
}

impl StreamEvent {
    pub fn error(kind: StreamErrorKind, cause: impl Into<String>) -> Self {
        StreamEvent::Error {
            cause: cause.into(),
            kind,
        }
    }
}

impl std::fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamEvent::Chunk(text) => write!(f, "chunk({} bytes)", text.len()),
            StreamEvent::End(text) => write!(f, "end({} bytes)", text.len()),
            StreamEvent::Error { cause, kind } => write!(f, "{kind} error: {cause}"),
        }
    }
}
