//! Markdown styling for finished assistant replies
//!
//! Walks the pulldown-cmark event stream and turns it into styled
//! ratatui lines. Replies without any markdown structure are left to the
//! caller's plain-text rendering so their line layout stays untouched.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const BULLET: &str = "• ";
const QUOTE_BAR: &str = "│ ";
const CODE_INDENT: &str = "  ";
const RULE: &str = "────────────────────";

/// Style `text` as markdown, or `None` when it is plain prose.
pub fn render_markdown(text: &str) -> Option<Vec<Line<'static>>> {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    // `Some(n)` for ordered lists, holding the next item number
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    structured: bool,
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                for code_line in text.lines() {
                    self.current.push(Span::styled(
                        format!("{}{}", CODE_INDENT, code_line),
                        code_style(),
                    ));
                    self.flush();
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                self.current
                    .push(Span::styled(text.into_string(), self.style()));
            }
            Event::Code(code) => {
                self.structured = true;
                self.current.push(Span::styled(code.into_string(), code_style()));
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.structured = true;
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    RULE,
                    Style::default().fg(Color::DarkGray),
                )));
                self.blank();
            }
            Event::TaskListMarker(done) => {
                self.current
                    .push(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.structured = true;
                self.flush();
                self.styles.push(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Tag::BlockQuote(_) => {
                self.structured = true;
                self.flush();
                self.quote_depth += 1;
                self.styles.push(Style::default().fg(Color::Gray));
            }
            Tag::CodeBlock(_) => {
                self.structured = true;
                self.flush();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.structured = true;
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}{}. ", indent, n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}{}", indent, BULLET),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::Cyan)));
            }
            Tag::Emphasis => self.push_inline(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_inline(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_inline(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => self.push_inline(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                // Items of loose lists keep their paragraphs together
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.flush();
                self.blank();
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.styles.pop();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.styles.pop();
            }
            _ => {}
        }
    }

    fn push_inline(&mut self, style: Style) {
        self.structured = true;
        self.styles.push(style);
    }

    fn style(&self) -> Style {
        self.styles
            .iter()
            .fold(Style::default(), |acc, style| acc.patch(*style))
    }

    /// Move the pending spans into a finished line
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                QUOTE_BAR.repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    /// Separate blocks with a single empty line
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Option<Vec<Line<'static>>> {
        self.flush();
        if !self.structured {
            return None;
        }
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        Some(self.lines)
    }
}

fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_plain_prose_is_left_alone() {
        assert!(render_markdown("Just a sentence.\nAnd another one.").is_none());
        assert!(render_markdown("").is_none());
    }

    #[test]
    fn test_heading_and_list() {
        let lines = render_markdown("# Steps\n\n- first\n- second\n\n1. one\n2. two").unwrap();
        assert_eq!(
            plain(&lines),
            vec!["Steps", "", "• first", "• second", "", "1. one", "2. two"]
        );
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_nested_list_is_indented() {
        let lines = render_markdown("- outer\n  - inner").unwrap();
        assert_eq!(plain(&lines), vec!["• outer", "  • inner"]);
    }

    #[test]
    fn test_code_block_and_inline_code() {
        let lines =
            render_markdown("Run `cargo fmt`:\n\n```rust\nfn main() {}\nlet x = 1;\n```").unwrap();
        assert_eq!(
            plain(&lines),
            vec!["Run cargo fmt:", "", "  fn main() {}", "  let x = 1;"]
        );
        assert_eq!(lines[0].spans[1].style, code_style());
        assert_eq!(lines[2].spans[0].style, code_style());
    }

    #[test]
    fn test_emphasis_and_quote() {
        let lines = render_markdown("> **Note** this\n\nafter").unwrap();
        assert_eq!(plain(&lines), vec!["│ Note this", "", "after"]);
        let note = &lines[0].spans[1];
        assert_eq!(note.content, "Note");
        assert!(note.style.add_modifier.contains(Modifier::BOLD));
    }
}
