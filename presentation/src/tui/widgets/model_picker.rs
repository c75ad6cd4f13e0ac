//! Model picker overlay

use crate::tui::state::ModelPicker;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct ModelPickerWidget<'a> {
    picker: &'a ModelPicker,
}

impl<'a> ModelPickerWidget<'a> {
    pub fn new(picker: &'a ModelPicker) -> Self {
        Self { picker }
    }
}

impl<'a> Widget for ModelPickerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let selected_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD);

        let lines: Vec<Line> = self
            .picker
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                if i == self.picker.selected {
                    Line::from(Span::styled(format!("▸ {}", model), selected_style))
                } else {
                    Line::from(format!("  {}", model))
                }
            })
            .collect();

        // Keep the selection visible in short terminals
        let inner_height = area.height.saturating_sub(2) as usize;
        let scroll = (self.picker.selected + 1).saturating_sub(inner_height);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Select model ")
            .style(Style::default().fg(Color::Magenta));

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0))
            .render(area, buf);
    }
}
