//! Presentation layer for ask
//!
//! This crate contains the CLI definition, the interactive terminal chat,
//! and the console renderer for single-turn mode.

pub mod cli;
pub mod output;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleRenderer;
pub use output::one_shot::{OneShotError, run_blocking, run_streaming};
pub use tui::TuiApp;
