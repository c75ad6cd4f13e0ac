//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ask
#[derive(Parser, Debug)]
#[command(name = "ask")]
#[command(author, version, about = "Chat with LLMs from your terminal")]
#[command(long_about = r#"
Ask streams replies from OpenRouter-compatible chat-completions endpoints.

Without a question an interactive chat opens in the terminal. With a
question a single turn is printed to stdout and the process exits.

The API key is read from the variable named by provider.api_key_env
(OPENROUTER_API_KEY by default).

Configuration files are loaded from (in priority order):
1. ASK_* environment variables   e.g. ASK_PROVIDER__TIMEOUT_SECONDS=60
2. --config <path>               Explicit config file
3. ./ask.toml                    Project-level config
4. ~/.config/ask/config.toml     Global config

Example:
  ask
  ask "What's the difference between Rc and Arc?"
  ask -m openai/gpt-4.1 --no-stream "Summarize RFC 2119"
"#)]
pub struct Cli {
    /// Question for a single turn (omit to start the interactive chat)
    pub question: Option<String>,

    /// Model to use instead of the configured default
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Wait for the whole reply instead of streaming it (single turn only)
    #[arg(long)]
    pub no_stream: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Log file for the interactive chat (default: ask-debug.log in the data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Whether this invocation runs a single turn instead of the chat UI
    pub fn is_one_shot(&self) -> bool {
        self.question.is_some()
    }
}
