//! Server-sent events decoding for streamed completions.
//!
//! [`SseDecoder`] classifies one line at a time and keeps the per-stream
//! state (accumulated text, malformed payload count). [`pump`] drives a
//! decoder over any buffered reader and forwards the result to a
//! [`StreamSink`], always finishing with exactly one terminal call.

use super::protocol::StreamChunk;
use ask_application::{GatewayError, StreamPolicy, StreamSink};
use ask_domain::StreamErrorKind;
use ask_domain::util::preview;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

/// What a single line means for the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Nothing to emit (blank line, comment, tolerated glitch, empty delta)
    Skip,
    /// A text fragment to forward
    Chunk(String),
    /// `[DONE]` was received
    Done,
    /// The stream must terminate with this error
    Failed(GatewayError),
}

/// Line decoder for one stream
#[derive(Debug)]
pub struct SseDecoder {
    tolerance: u32,
    malformed: u32,
    text: String,
}

impl SseDecoder {
    pub fn new(policy: &StreamPolicy) -> Self {
        Self {
            tolerance: policy.malformed_line_tolerance,
            malformed: 0,
            text: String::new(),
        }
    }

    /// Classify one line (without its line terminator).
    pub fn decode_line(&mut self, line: &str) -> LineOutcome {
        if line.is_empty() || line.starts_with(':') {
            return LineOutcome::Skip;
        }
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            debug!("Ignoring non-data line: {}", preview(line, 80));
            return LineOutcome::Skip;
        };
        if payload == DONE_MARKER {
            return LineOutcome::Done;
        }

        let chunk: StreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                self.malformed += 1;
                if self.malformed > self.tolerance {
                    return LineOutcome::Failed(GatewayError::Decode(format!(
                        "malformed stream payload: {}",
                        e
                    )));
                }
                warn!(
                    "Skipping malformed stream payload ({}/{}): {}",
                    self.malformed,
                    self.tolerance,
                    preview(payload, 120)
                );
                return LineOutcome::Skip;
            }
        };

        if let Some(error) = chunk.error {
            return LineOutcome::Failed(GatewayError::Api(error.message));
        }
        if let Some(reason) = chunk.finish_reason() {
            debug!("Finish reason: {}", reason);
        }
        match chunk.content() {
            Some(text) => {
                self.text.push_str(text);
                LineOutcome::Chunk(text.to_string())
            }
            None => LineOutcome::Skip,
        }
    }

    /// Text accumulated from every chunk so far
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Decode `reader` line by line into `sink` until a terminal condition.
///
/// Lines are decoded lossily so a stray invalid byte reaches the decoder
/// instead of failing the read. Returns early without a terminal event
/// only when the consumer has dropped its handle.
pub async fn pump<R>(reader: R, mut decoder: SseDecoder, sink: StreamSink)
where
    R: AsyncBufRead,
{
    let mut reader = std::pin::pin!(reader);
    let mut buf = Vec::new();
    loop {
        if sink.is_closed() {
            debug!("Stream consumer dropped, stopping");
            return;
        }
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                debug!("Stream closed without [DONE]");
                sink.end(decoder.into_text()).await;
                return;
            }
            Ok(_) => {
                let raw = String::from_utf8_lossy(&buf);
                let line = trim_line_ending(&raw);
                match decoder.decode_line(line) {
                    LineOutcome::Skip => {}
                    LineOutcome::Chunk(text) => {
                        if !sink.chunk(text).await {
                            debug!("Stream consumer dropped, stopping");
                            return;
                        }
                    }
                    LineOutcome::Done => {
                        debug!("Stream done ({} bytes)", decoder.text().len());
                        sink.end(decoder.into_text()).await;
                        return;
                    }
                    LineOutcome::Failed(error) => {
                        warn!("Stream failed: {}", error);
                        sink.fail_with(error).await;
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("Stream read failed: {}", e);
                sink.fail(StreamErrorKind::StreamRead, e.to_string()).await;
                return;
            }
        }
    }
}

/// Strip one trailing `\n` or `\r\n`
fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
