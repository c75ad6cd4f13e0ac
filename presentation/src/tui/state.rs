//! TUI application state
//!
//! Single source of truth for everything the TUI renders.
//! Updated from render projections ([`UiEvent`]) and key presses.

use super::mode::Mode;
use ask_application::UiEvent;
use ask_domain::Model;
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Who wrote a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Assistant,
    Error,
}

/// One rendered block of the conversation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub text: String,
}

impl Entry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Model picker overlay state
#[derive(Debug, Clone)]
pub struct ModelPicker {
    pub models: Vec<Model>,
    pub selected: usize,
}

impl ModelPicker {
    /// Open with `current` highlighted (or the first entry).
    pub fn new(models: Vec<Model>, current: &Model) -> Self {
        let selected = models.iter().position(|m| m == current).unwrap_or(0);
        Self { models, selected }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.models.len() {
            self.selected += 1;
        }
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.models.get(self.selected)
    }
}

/// Central TUI state, owned by the TuiApp select! loop
pub struct TuiState {
    pub mode: Mode,

    // -- Input line --
    pub input: String,
    pub cursor_pos: usize,

    // -- Conversation --
    pub entries: Vec<Entry>,
    /// Reply text streamed so far in the current turn
    pub streaming_text: Option<String>,
    /// Lines scrolled up from the bottom (0 = follow the tail)
    pub scroll_offset: usize,

    // -- Status --
    pub model: Model,
    pub sending: bool,
    pub spinner_frame: usize,
    pub flash_message: Option<(String, Instant)>,

    // -- Overlay --
    pub picker: Option<ModelPicker>,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(model: Model) -> Self {
        Self {
            mode: Mode::default(),
            input: String::new(),
            cursor_pos: 0,
            entries: Vec::new(),
            streaming_text: None,
            scroll_offset: 0,
            model,
            sending: false,
            spinner_frame: 0,
            flash_message: None,
            picker: None,
            should_quit: false,
        }
    }

    /// Apply one render projection from the session controller.
    pub fn apply(&mut self, event: &UiEvent) {
        match event {
            UiEvent::AppendUserLine(text) => {
                self.entries.push(Entry::new(EntryKind::User, text.as_str()));
                self.scroll_offset = 0;
            }
            UiEvent::AppendChunk(text) => {
                self.streaming_text
                    .get_or_insert_with(String::new)
                    .push_str(text);
            }
            UiEvent::FinalizeAssistant(text) => {
                self.streaming_text = None;
                self.entries
                    .push(Entry::new(EntryKind::Assistant, text.as_str()));
            }
            UiEvent::AppendError(cause) => {
                self.streaming_text = None;
                self.entries.push(Entry::new(
                    EntryKind::Error,
                    format!("assistant stream error: {}", cause),
                ));
            }
            UiEvent::SetSendingIndicator(sending) => {
                self.sending = *sending;
                self.spinner_frame = 0;
            }
            UiEvent::ModelChanged(model) => {
                self.model = model.clone();
                self.set_flash(format!("Model: {}", model));
            }
        }
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= prev.len_utf8();
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Take the input line, leaving it empty.
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    // -- Status --

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some((message.into(), Instant::now()));
    }

    /// Advance animations and expire old flash messages.
    pub fn tick(&mut self, flash_ttl: Duration) {
        if self.sending {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        if let Some((_, since)) = &self.flash_message {
            if since.elapsed() >= flash_ttl {
                self.flash_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TuiState {
        TuiState::new(Model::default())
    }

    #[test]
    fn test_streamed_turn_becomes_one_entry() {
        let mut state = state();
        state.apply(&UiEvent::AppendUserLine("hi".into()));
        state.apply(&UiEvent::SetSendingIndicator(true));
        state.apply(&UiEvent::AppendChunk("Hel".into()));
        state.apply(&UiEvent::AppendChunk("lo".into()));
        assert_eq!(state.streaming_text.as_deref(), Some("Hello"));
        assert!(state.sending);

        state.apply(&UiEvent::FinalizeAssistant("Hello".into()));
        state.apply(&UiEvent::SetSendingIndicator(false));

        assert!(state.streaming_text.is_none());
        assert!(!state.sending);
        assert_eq!(
            state.entries,
            vec![
                Entry::new(EntryKind::User, "hi"),
                Entry::new(EntryKind::Assistant, "Hello"),
            ]
        );
    }

    #[test]
    fn test_error_replaces_partial_reply() {
        let mut state = state();
        state.apply(&UiEvent::AppendUserLine("hi".into()));
        state.apply(&UiEvent::AppendChunk("par".into()));
        state.apply(&UiEvent::AppendError("timeout".into()));

        assert!(state.streaming_text.is_none());
        assert_eq!(
            state.entries.last(),
            Some(&Entry::new(EntryKind::Error, "assistant stream error: timeout"))
        );
    }

    #[test]
    fn test_model_changed_updates_status_and_flashes() {
        let mut state = state();
        let model: Model = "openai/o3".parse().unwrap();
        state.apply(&UiEvent::ModelChanged(model.clone()));
        assert_eq!(state.model, model);
        assert!(state.flash_message.is_some());

        state.tick(Duration::ZERO);
        assert!(state.flash_message.is_none());
    }

    #[test]
    fn test_input_editing_handles_multibyte() {
        let mut state = state();
        for c in "héllo".chars() {
            state.insert_char(c);
        }
        state.cursor_left();
        state.cursor_left();
        state.cursor_left();
        state.delete_char();
        assert_eq!(state.input, "hllo");
        assert_eq!(state.cursor_pos, 1);

        state.cursor_end();
        state.cursor_right();
        assert_eq!(state.cursor_pos, state.input.len());

        assert_eq!(state.take_input(), "hllo");
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn test_scroll_never_goes_below_tail() {
        let mut state = state();
        state.scroll_up(10);
        state.scroll_down(25);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_picker_selection_is_clamped() {
        let models = Model::catalogue();
        let current = models[1].clone();
        let mut picker = ModelPicker::new(models.clone(), &current);
        assert_eq!(picker.selected, 1);

        picker.select_prev();
        picker.select_prev();
        assert_eq!(picker.selected_model(), Some(&models[0]));

        for _ in 0..20 {
            picker.select_next();
        }
        assert_eq!(picker.selected_model(), models.last());
    }

    #[test]
    fn test_spinner_advances_only_while_sending() {
        let mut state = state();
        state.tick(Duration::from_secs(5));
        assert_eq!(state.spinner_frame, 0);

        state.apply(&UiEvent::SetSendingIndicator(true));
        state.tick(Duration::from_secs(5));
        assert_eq!(state.spinner_frame, 1);
        assert_eq!(state.spinner(), "⠙");
    }
}
