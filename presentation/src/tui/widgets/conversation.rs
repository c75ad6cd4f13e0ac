//! Conversation widget — message history + streaming text

use super::markdown::render_markdown;
use crate::tui::state::{EntryKind, TuiState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ConversationWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn format_messages(&self) -> Text<'_> {
        let mut lines: Vec<Line> = Vec::new();

        for entry in &self.state.entries {
            match entry.kind {
                EntryKind::User => {
                    let style = Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                    for (i, content_line) in entry.text.lines().enumerate() {
                        let prefix = if i == 0 { "> " } else { "  " };
                        lines.push(Line::from(Span::styled(
                            format!("{}{}", prefix, content_line),
                            style,
                        )));
                    }
                }
                EntryKind::Assistant => match render_markdown(&entry.text) {
                    Some(styled) => lines.extend(styled),
                    None => {
                        for content_line in entry.text.lines() {
                            lines.push(Line::from(content_line.to_string()));
                        }
                    }
                },
                EntryKind::Error => {
                    let style = Style::default().fg(Color::Red);
                    for content_line in entry.text.lines() {
                        lines.push(Line::from(Span::styled(content_line.to_string(), style)));
                    }
                }
            }
            lines.push(Line::from(""));
        }

        // Append streaming text if present
        if let Some(streaming) = &self.state.streaming_text {
            for content_line in streaming.lines() {
                lines.push(Line::from(content_line.to_string()));
            }
            lines.push(Line::from(Span::styled(
                "▌",
                Style::default().fg(Color::Green),
            )));
        }

        Text::from(lines)
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.format_messages();
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // Built without block so line_count returns pure content lines.
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let total_lines = paragraph.line_count(content_width) as u16;

        // scroll_offset=0 means "show bottom"
        let scroll = if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            let offset = (self.state.scroll_offset.min(u16::MAX as usize) as u16).min(max_scroll);
            max_scroll - offset
        } else {
            0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" ask · {} ", self.state.model))
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}
