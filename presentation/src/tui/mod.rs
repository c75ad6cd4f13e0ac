//! TUI (Text User Interface) module for ask
//!
//! A single-pane chat in the alternate screen: conversation, input line,
//! status bar, and a model picker overlay.

mod app;
mod mode;
mod state;
mod widgets;

pub use app::TuiApp;
pub use mode::{Action, KeyHandler, Mode};
pub use state::{Entry, EntryKind, ModelPicker, TuiState};
