//! Session Controller
//!
//! Owns the conversation and drives one turn at a time:
//!
//! 1. [`send`](SessionController::send) appends the user message, snapshots
//!    the history and starts a stream on the transport
//! 2. the host loop awaits [`next_event`](SessionController::next_event) and
//!    feeds each event to [`handle_event`](SessionController::handle_event)
//! 3. the terminal event commits (`End`) or discards (`Error`) the reply and
//!    returns the session to `Idle`
//!
//! Render projections are emitted as [`UiEvent`]s on a channel for the
//! presentation layer.

use crate::ports::stream_transport::{StreamHandle, StreamTransport};
use crate::ports::ui_event::UiEvent;
use ask_domain::util::preview;
use ask_domain::{
    Conversation, DomainError, Message, Model, Prompt, SessionState, StreamErrorKind,
    StreamEvent, Transition,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Why a [`send`](SessionController::send) or model change was refused.
///
/// A refusal never changes the conversation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendRejected {
    #[error("A reply is still in progress ({0})")]
    Busy(SessionState),

    #[error(transparent)]
    InvalidPrompt(#[from] DomainError),
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant reply was committed to the conversation.
    Completed(String),
    /// The stream failed; only the user message was kept.
    Failed {
        cause: String,
        kind: StreamErrorKind,
    },
}

/// Per-turn state: where the turn is, what has streamed so far, and where
/// the next event comes from.
#[derive(Debug, Default)]
struct Session {
    state: SessionState,
    buffer: String,
    source: Option<StreamHandle>,
}

/// Single-flight conversation controller
///
/// The only writer of the [`Conversation`]. Transports receive snapshots and
/// never write back.
pub struct SessionController {
    transport: Arc<dyn StreamTransport>,
    model: Model,
    conversation: Conversation,
    session: Session,
    /// Channel sender for render projections
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl SessionController {
    pub fn new(
        transport: Arc<dyn StreamTransport>,
        model: Model,
        tx: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            transport,
            model,
            conversation: Conversation::new(),
            session: Session::default(),
            tx,
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn is_busy(&self) -> bool {
        !self.session.state.is_idle()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Start a turn with `prompt`.
    ///
    /// Rejected without side effects while another turn is in flight or when
    /// the prompt is blank.
    pub fn send(&mut self, prompt: &str) -> Result<(), SendRejected> {
        let Some(next) = self.session.state.next(Transition::Send) else {
            debug!(
                "Send received while {}, ignoring",
                self.session.state
            );
            return Err(SendRejected::Busy(self.session.state));
        };
        let prompt = Prompt::try_new(prompt)?;

        info!(
            model = %self.model,
            "Sending prompt: {}",
            preview(prompt.content(), 100)
        );

        self.session.state = next;
        self.session.buffer.clear();

        let text = prompt.into_content();
        self.conversation.append(Message::user(text.clone()));
        self.emit(UiEvent::AppendUserLine(text));
        self.emit(UiEvent::SetSendingIndicator(true));

        let snapshot = self.conversation.snapshot();
        debug!("History length for stream: {}", snapshot.len());
        self.session.source = Some(self.transport.start_stream(&self.model, snapshot));

        Ok(())
    }

    /// Wait for the next event of the active stream.
    ///
    /// Pending forever while idle, so it can sit in a `select!` branch
    /// permanently. A stream that closes without a terminal event yields a
    /// synthesized `stream-read` error.
    pub async fn next_event(&mut self) -> StreamEvent {
        let Some(source) = self.session.source.as_mut() else {
            return futures::future::pending().await;
        };
        match source.recv().await {
            Some(event) => event,
            None => StreamEvent::error(
                StreamErrorKind::StreamRead,
                "stream closed before completion",
            ),
        }
    }

    /// Apply one stream event. Returns the outcome when it ended the turn.
    pub fn handle_event(&mut self, event: StreamEvent) -> Option<TurnOutcome> {
        let state = self.session.state;
        let Some(next) = state.next(Transition::from(&event)) else {
            warn!("Ignoring {} while {}", event, state);
            return None;
        };
        self.session.state = next;

        match event {
            StreamEvent::Chunk(text) => {
                self.session.buffer.push_str(&text);
                self.emit(UiEvent::AppendChunk(text));
                None
            }
            StreamEvent::End(full_text) => {
                if full_text != self.session.buffer {
                    warn!(
                        streamed = self.session.buffer.len(),
                        reported = full_text.len(),
                        "Final text differs from streamed chunks"
                    );
                }
                info!("Reply completed ({} bytes)", full_text.len());
                self.conversation.append(Message::assistant(full_text.clone()));
                self.finish_turn();
                self.emit(UiEvent::FinalizeAssistant(full_text.clone()));
                self.emit(UiEvent::SetSendingIndicator(false));
                Some(TurnOutcome::Completed(full_text))
            }
            StreamEvent::Error { cause, kind } => {
                error!(%kind, "Assistant stream error: {}", cause);
                self.finish_turn();
                self.emit(UiEvent::AppendError(cause.clone()));
                self.emit(UiEvent::SetSendingIndicator(false));
                Some(TurnOutcome::Failed { cause, kind })
            }
        }
    }

    /// Send `prompt` and drive the turn to completion.
    pub async fn run_turn(&mut self, prompt: &str) -> Result<TurnOutcome, SendRejected> {
        self.send(prompt)?;
        loop {
            let event = self.next_event().await;
            if let Some(outcome) = self.handle_event(event) {
                return Ok(outcome);
            }
        }
    }

    /// Use `model` for the next turn. Refused while a turn is in flight.
    pub fn select_model(&mut self, model: Model) -> Result<(), SendRejected> {
        if self.is_busy() {
            debug!("Model change to {} refused while {}", model, self.session.state);
            return Err(SendRejected::Busy(self.session.state));
        }
        info!("Model selected: {}", model);
        self.model = model.clone();
        self.emit(UiEvent::ModelChanged(model));
        Ok(())
    }

    fn finish_turn(&mut self) {
        self.session.source = None;
        self.session.buffer.clear();
    }

    fn emit(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }
}
