//! TUI widgets — ratatui components for the main layout
//!
//! Layout:
//! ┌── Conversation (flex) ───────────────────────────┐
//! ├── Input (3) ─────────────────────────────────────┤
//! └── StatusBar (1) ─────────────────────────────────┘
//!
//! The model picker is drawn as a centered overlay on top.

pub mod conversation;
pub mod input;
pub mod markdown;
pub mod model_picker;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Compute the main layout regions from a terminal area
pub struct MainLayout {
    pub conversation: Rect,
    pub input: Rect,
    pub status_bar: Rect,
}

impl MainLayout {
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        Self {
            conversation: vertical[0],
            input: vertical[1],
            status_bar: vertical[2],
        }
    }

    /// Centered rectangle covering the given percentages of `area`
    pub fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vert[1])[1]
    }
}
