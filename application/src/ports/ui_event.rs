//! Render projections emitted by the session controller.
//!
//! These events form the output port from the application layer to the
//! presentation layer. The controller never renders; it only emits these
//! in the order the view should apply them.

use ask_domain::Model;

/// Projections for the conversation view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Show the user's prompt as a new conversation entry
    AppendUserLine(String),
    /// Append streamed assistant text to the entry being built
    AppendChunk(String),
    /// Replace the streamed entry with the final assistant text
    FinalizeAssistant(String),
    /// Show an error entry for the failed turn
    AppendError(String),
    /// Show or clear the "sending" indicator
    SetSendingIndicator(bool),
    /// The model used for the next turn changed
    ModelChanged(Model),
}
