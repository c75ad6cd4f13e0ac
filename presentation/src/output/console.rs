//! Console renderer for single-turn mode
//!
//! Prints the render projections of one turn to stdout as they arrive.
//! A spinner on stderr covers the wait for the first chunk.

use ask_application::UiEvent;
use ask_domain::Model;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Renders [`UiEvent`]s of a single turn to the terminal
pub struct ConsoleRenderer<W: Write> {
    out: W,
    model: Model,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
    header_printed: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(model: Model) -> Self {
        Self::new(io::stdout(), model)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, model: Model) -> Self {
        Self {
            out,
            model,
            spinner: None,
            show_spinner: true,
            header_printed: false,
        }
    }

    /// Disable the waiting spinner (used when stderr is not a terminal).
    pub fn without_spinner(mut self) -> Self {
        self.show_spinner = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&mut self) {
        if !self.show_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message(format!("Waiting for {}...", self.model));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn print_header(&mut self) -> io::Result<()> {
        if !self.header_printed {
            self.stop_spinner();
            writeln!(self.out, "{}", format!("── {} ──", self.model).yellow().bold())?;
            self.header_printed = true;
        }
        Ok(())
    }

    /// Render one projection.
    pub fn render(&mut self, event: &UiEvent) -> io::Result<()> {
        match event {
            UiEvent::AppendUserLine(_) => {}
            UiEvent::SetSendingIndicator(true) => self.start_spinner(),
            UiEvent::SetSendingIndicator(false) => self.stop_spinner(),
            UiEvent::AppendChunk(text) => {
                self.print_header()?;
                write!(self.out, "{}", text)?;
                self.out.flush()?;
            }
            UiEvent::FinalizeAssistant(_) => {
                self.print_header()?;
                writeln!(self.out)?;
                self.out.flush()?;
            }
            UiEvent::AppendError(cause) => {
                self.stop_spinner();
                if self.header_printed {
                    writeln!(self.out)?;
                    self.out.flush()?;
                }
                eprintln!("{} {}", "assistant stream error:".red().bold(), cause);
            }
            UiEvent::ModelChanged(model) => self.model = model.clone(),
        }
        Ok(())
    }

    /// Print a whole reply at once (non-streaming mode).
    pub fn print_reply(&mut self, text: &str) -> io::Result<()> {
        self.print_header()?;
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}
