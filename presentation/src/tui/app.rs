//! TUI application — main loop
//!
//! The session controller lives inside the UI loop; each `select!` branch
//! handles exactly one item:
//! ```text
//! TuiApp (select! loop)
//!   ├─ crossterm EventStream        → keys / resize
//!   ├─ controller.next_event()      → one StreamEvent per iteration
//!   ├─ ui_rx (UiEvent projections)  → TuiState
//!   └─ tick_interval                → spinner, flash expiry
//! ```

use super::mode::{Action, KeyHandler, Mode};
use super::state::{ModelPicker, TuiState};
use super::widgets::{
    MainLayout, conversation::ConversationWidget, input::InputWidget,
    model_picker::ModelPickerWidget, status_bar::StatusBarWidget,
};
use ask_application::{SendRejected, SessionController, UiEvent};
use ask_domain::Model;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

const TICK: Duration = Duration::from_millis(100);
const FLASH_TTL: Duration = Duration::from_secs(3);
const PAGE_LINES: usize = 10;

/// Main TUI application
pub struct TuiApp {
    controller: SessionController,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    models: Vec<Model>,
    state: TuiState,
}

impl TuiApp {
    /// `ui_rx` must be the receiving end of the controller's projection channel.
    pub fn new(
        controller: SessionController,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        models: Vec<Model>,
    ) -> Self {
        let state = TuiState::new(controller.model().clone());
        Self {
            controller,
            ui_rx,
            models,
            state,
        }
    }

    /// Run the TUI main loop until the user quits
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(info);
        }));

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!(
            "Chat closed with {} messages",
            self.controller.conversation().len()
        );
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            if self.state.should_quit {
                return Ok(());
            }

            tokio::select! {
                // Terminal events (keyboard, resize)
                Some(term_event) = event_stream.next() => {
                    self.handle_terminal_event(term_event?);
                }

                // One stream event from the active turn (pending while idle)
                stream_event = self.controller.next_event() => {
                    if let Some(outcome) = self.controller.handle_event(stream_event) {
                        debug!("Turn finished: {:?}", outcome);
                    }
                }

                // Render projections from the controller
                Some(ui_event) = self.ui_rx.recv() => {
                    self.state.apply(&ui_event);
                }

                _ = tick.tick() => {
                    self.state.tick(FLASH_TTL);
                }
            }
        }
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = KeyHandler::handle(self.state.mode, key);
                self.handle_action(action);
            }
            // Resize and everything else just trigger a redraw
            _ => {}
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Submit => self.submit(),
            Action::InsertChar(c) => self.state.insert_char(c),
            Action::NewLine => self.state.insert_char('\n'),
            Action::DeleteChar => self.state.delete_char(),
            Action::CursorLeft => self.state.cursor_left(),
            Action::CursorRight => self.state.cursor_right(),
            Action::CursorStart => self.state.cursor_home(),
            Action::CursorEnd => self.state.cursor_end(),
            Action::PageUp => self.state.scroll_up(PAGE_LINES),
            Action::PageDown => self.state.scroll_down(PAGE_LINES),
            Action::HalfPageUp => self.state.scroll_up(PAGE_LINES / 2),
            Action::HalfPageDown => self.state.scroll_down(PAGE_LINES / 2),
            Action::LineUp => self.state.scroll_up(1),
            Action::LineDown => self.state.scroll_down(1),
            Action::OpenPicker => self.open_picker(),
            Action::SelectPrev => {
                if let Some(picker) = self.state.picker.as_mut() {
                    picker.select_prev();
                }
            }
            Action::SelectNext => {
                if let Some(picker) = self.state.picker.as_mut() {
                    picker.select_next();
                }
            }
            Action::Confirm => self.confirm_picker(),
            Action::Cancel => self.close_picker(),
            Action::None => {}
        }
    }

    /// Send the input line. Refused sends keep the input for later.
    fn submit(&mut self) {
        if self.state.input.trim().is_empty() {
            return;
        }
        match self.controller.send(&self.state.input) {
            Ok(()) => {
                self.state.take_input();
            }
            Err(SendRejected::Busy(_)) => {
                self.state.set_flash("Still waiting for the current reply");
            }
            Err(SendRejected::InvalidPrompt(e)) => {
                self.state.set_flash(e.to_string());
            }
        }
    }

    fn open_picker(&mut self) {
        if self.controller.is_busy() {
            self.state
                .set_flash("Model can be changed once the reply is done");
            return;
        }
        self.state.picker = Some(ModelPicker::new(
            self.models.clone(),
            self.controller.model(),
        ));
        self.state.mode = Mode::Picker;
    }

    fn confirm_picker(&mut self) {
        let chosen = self
            .state
            .picker
            .as_ref()
            .and_then(|p| p.selected_model())
            .cloned();
        self.close_picker();

        if let Some(model) = chosen {
            if &model == self.controller.model() {
                return;
            }
            if let Err(e) = self.controller.select_model(model) {
                self.state.set_flash(e.to_string());
            }
        }
    }

    fn close_picker(&mut self) {
        self.state.picker = None;
        self.state.mode = Mode::Chat;
    }
}

/// Render all widgets
fn render(frame: &mut ratatui::Frame, state: &TuiState) {
    let layout = MainLayout::compute(frame.area());

    frame.render_widget(ConversationWidget::new(state), layout.conversation);
    frame.render_widget(InputWidget::new(state), layout.input);
    frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

    if let Some(picker) = &state.picker {
        let area = MainLayout::centered_overlay(50, 50, frame.area());
        frame.render_widget(ModelPickerWidget::new(picker), area);
    }
}
