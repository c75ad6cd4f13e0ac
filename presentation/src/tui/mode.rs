//! TUI input modes and key mapping
//!
//! - Chat mode: editing the input line and sending it
//! - Picker mode: choosing a model from the overlay list

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which surface receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing into the input line
    #[default]
    Chat,
    /// Model picker overlay is open
    Picker,
}

impl Mode {
    /// Get the mode indicator string for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::Picker => "MODEL",
        }
    }

    /// Get the mode color for status line
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Chat => Color::Green,
            Self::Picker => Color::Magenta,
        }
    }
}

/// User action derived from key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the input line (Enter)
    Submit,
    /// Quit application
    Quit,
    /// Insert character
    InsertChar(char),
    /// Insert a line break into the input
    NewLine,
    /// Delete character before the cursor (Backspace)
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    /// Scroll the conversation one page up
    PageUp,
    /// Scroll the conversation one page down
    PageDown,
    HalfPageUp,
    HalfPageDown,
    /// Scroll the conversation by one line
    LineUp,
    LineDown,
    /// Open the model picker
    OpenPicker,
    /// Move the picker selection up
    SelectPrev,
    /// Move the picker selection down
    SelectNext,
    /// Use the highlighted model
    Confirm,
    /// Close the picker without changing the model
    Cancel,
    /// No action
    None,
}

/// Key event handler - maps key events to actions based on current mode
pub struct KeyHandler;

impl KeyHandler {
    /// Handle key event in the given mode
    pub fn handle(mode: Mode, key: KeyEvent) -> Action {
        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match mode {
            Mode::Chat => Self::handle_chat(key),
            Mode::Picker => Self::handle_picker(key),
        }
    }

    fn handle_chat(key: KeyEvent) -> Action {
        match (key.code, key.modifiers) {
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => Action::OpenPicker,
            (KeyCode::Char('j'), KeyModifiers::CONTROL) => Action::NewLine,
            (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::PageUp,
            (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::LineUp,
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::LineDown,
            (KeyCode::Enter, m) if m.contains(KeyModifiers::SHIFT) => Action::NewLine,
            (KeyCode::Enter, _) => Action::Submit,
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
            (KeyCode::Backspace, _) => Action::DeleteChar,
            (KeyCode::Left, _) => Action::CursorLeft,
            (KeyCode::Right, _) => Action::CursorRight,
            (KeyCode::Home, _) => Action::CursorStart,
            (KeyCode::End, _) => Action::CursorEnd,
            (KeyCode::PageUp, _) => Action::PageUp,
            (KeyCode::PageDown, _) => Action::PageDown,
            (KeyCode::Up, _) => Action::LineUp,
            (KeyCode::Down, _) => Action::LineDown,
            _ => Action::None,
        }
    }

    fn handle_picker(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrev,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_mode_default() {
        assert_eq!(Mode::default(), Mode::Chat);
        assert_eq!(Mode::Chat.indicator(), "CHAT");
        assert_eq!(Mode::Picker.indicator(), "MODEL");
    }

    #[test]
    fn test_chat_mode_key_handling() {
        assert_eq!(KeyHandler::handle(Mode::Chat, key(KeyCode::Enter)), Action::Submit);
        assert_eq!(
            KeyHandler::handle(Mode::Chat, key(KeyCode::Char('a'))),
            Action::InsertChar('a')
        );
        assert_eq!(
            KeyHandler::handle(
                Mode::Chat,
                KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)
            ),
            Action::InsertChar('A')
        );
        assert_eq!(KeyHandler::handle(Mode::Chat, ctrl('j')), Action::NewLine);
        assert_eq!(KeyHandler::handle(Mode::Chat, ctrl('k')), Action::OpenPicker);
        assert_eq!(
            KeyHandler::handle(Mode::Chat, key(KeyCode::Backspace)),
            Action::DeleteChar
        );
        assert_eq!(KeyHandler::handle(Mode::Chat, key(KeyCode::PageUp)), Action::PageUp);
        assert_eq!(
            KeyHandler::handle(Mode::Chat, key(KeyCode::PageDown)),
            Action::PageDown
        );
        // j and k are plain text while chatting
        assert_eq!(
            KeyHandler::handle(Mode::Chat, key(KeyCode::Char('k'))),
            Action::InsertChar('k')
        );
        assert_eq!(KeyHandler::handle(Mode::Chat, key(KeyCode::F(1))), Action::None);
    }

    #[test]
    fn test_chat_mode_scroll_keys() {
        for (event, action) in [
            (ctrl('b'), Action::PageUp),
            (ctrl('f'), Action::PageDown),
            (ctrl('u'), Action::HalfPageUp),
            (ctrl('d'), Action::HalfPageDown),
            (ctrl('o'), Action::LineUp),
            (ctrl('p'), Action::LineDown),
            (key(KeyCode::Up), Action::LineUp),
            (key(KeyCode::Down), Action::LineDown),
        ] {
            assert_eq!(KeyHandler::handle(Mode::Chat, event), action);
        }
    }

    #[test]
    fn test_picker_mode_key_handling() {
        assert_eq!(KeyHandler::handle(Mode::Picker, key(KeyCode::Up)), Action::SelectPrev);
        assert_eq!(
            KeyHandler::handle(Mode::Picker, key(KeyCode::Char('k'))),
            Action::SelectPrev
        );
        assert_eq!(
            KeyHandler::handle(Mode::Picker, key(KeyCode::Down)),
            Action::SelectNext
        );
        assert_eq!(
            KeyHandler::handle(Mode::Picker, key(KeyCode::Char('j'))),
            Action::SelectNext
        );
        assert_eq!(KeyHandler::handle(Mode::Picker, key(KeyCode::Enter)), Action::Confirm);
        assert_eq!(KeyHandler::handle(Mode::Picker, key(KeyCode::Esc)), Action::Cancel);
        assert_eq!(
            KeyHandler::handle(Mode::Picker, key(KeyCode::Char('x'))),
            Action::None
        );
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        assert_eq!(KeyHandler::handle(Mode::Chat, ctrl('c')), Action::Quit);
        assert_eq!(KeyHandler::handle(Mode::Picker, ctrl('c')), Action::Quit);
    }
}
