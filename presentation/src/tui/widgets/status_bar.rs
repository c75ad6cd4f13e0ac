//! Status bar widget — mode, model, sending spinner + key hints or flash messages

use crate::tui::mode::Mode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn hints(&self) -> String {
        if let Some((flash, _)) = &self.state.flash_message {
            return flash.clone();
        }
        match self.state.mode {
            Mode::Chat => {
                "Enter:send  Ctrl+J:newline  Ctrl+K:model  PgUp/PgDn ↑/↓:scroll  Ctrl+C:quit".into()
            }
            Mode::Picker => "↑/k ↓/j:move  Enter:select  Esc:cancel".into(),
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let mode = self.state.mode;
        let mut left = vec![
            Span::styled(
                format!(" {} ", mode.indicator()),
                Style::default()
                    .fg(Color::Black)
                    .bg(mode.color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {} ", self.state.model), bg_style),
        ];
        if self.state.sending {
            left.push(Span::styled(
                format!("{} sending ", self.state.spinner()),
                Style::default().fg(Color::Yellow).bg(Color::DarkGray),
            ));
        }
        let left_line = Line::from(left);
        let left_width = left_line.width() as u16;
        buf.set_line(area.x, area.y, &left_line, area.width);

        // Right-aligned hints, dropped when they would overlap
        let right_text = self.hints();
        let right_width = Line::from(right_text.as_str()).width() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + left_width {
            let right_line = Line::from(Span::styled(right_text, bg_style));
            buf.set_line(right_x, area.y, &right_line, right_width + 1);
        }
    }
}
