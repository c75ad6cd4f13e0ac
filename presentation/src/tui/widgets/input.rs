//! Input widget — prompt line with block cursor
//!
//! Supports multiline input: text is split on `\n` and rendered as
//! multiple `Line`s inside a `Paragraph`. The prompt prefix is shown
//! only on the first line; continuation lines get a "  " indent.

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.state.sending {
            Color::DarkGray
        } else {
            Color::Green
        };
        let title = if self.state.sending {
            " Assistant is thinking... "
        } else {
            " Message "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(color));

        let lines = build_lines(&self.state.input, self.state.cursor_pos, color);

        // Scroll so the cursor line is visible
        let inner_height = area.height.saturating_sub(2) as usize;
        let cursor_line = find_cursor_line(&self.state.input, self.state.cursor_pos);
        let scroll_offset = (cursor_line + 1).saturating_sub(inner_height);

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

/// Build lines with the prompt prefix and a block cursor
fn build_lines(text: &str, cursor_pos: usize, color: Color) -> Vec<Line<'static>> {
    let prefix_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let cursor_style = Style::default().fg(Color::Black).bg(color);

    let mut lines = Vec::new();
    let mut line_start = 0;

    for (i, line_text) in text.split('\n').enumerate() {
        let line_end = line_start + line_text.len();
        let prefix = if i == 0 { PROMPT } else { CONTINUATION };
        let mut spans = vec![Span::styled(prefix, prefix_style)];

        if (line_start..=line_end).contains(&cursor_pos) {
            let local = cursor_pos - line_start;
            let (before, after) = line_text.split_at(local);
            spans.push(Span::raw(before.to_string()));

            let mut rest = after.chars();
            match rest.next() {
                Some(ch) => {
                    spans.push(Span::styled(ch.to_string(), cursor_style));
                    spans.push(Span::raw(rest.as_str().to_string()));
                }
                // Cursor at end of line: block cursor on a space
                None => spans.push(Span::styled(" ", cursor_style)),
            }
        } else {
            spans.push(Span::raw(line_text.to_string()));
        }

        lines.push(Line::from(spans));
        line_start = line_end + 1; // +1 for the '\n'
    }

    lines
}

/// Find which line (0-indexed) the cursor is on
fn find_cursor_line(text: &str, cursor_pos: usize) -> usize {
    text[..cursor_pos.min(text.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_input_shows_prompt_and_cursor() {
        let lines = build_lines("", 0, Color::Green);
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), ">  ");
    }

    #[test]
    fn test_multiline_input_uses_continuation() {
        let lines = build_lines("first\nsecond", 3, Color::Green);
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "> first");
        assert_eq!(plain(&lines[1]), "  second");
        // Cursor sits on the 's' of "first"
        assert_eq!(lines[0].spans[2].content, "s");
    }

    #[test]
    fn test_cursor_line_lookup() {
        assert_eq!(find_cursor_line("a\nb\nc", 0), 0);
        assert_eq!(find_cursor_line("a\nb\nc", 4), 2);
        assert_eq!(find_cursor_line("a", 10), 0);
    }
}
