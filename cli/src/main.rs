//! CLI entrypoint for ask
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use ask_application::{SessionController, StreamTransport};
use ask_domain::Model;
use ask_infrastructure::{ApiKey, ConfigLoader, FileConfig, OpenRouterSettings, OpenRouterTransport};
use ask_presentation::{Cli, ConsoleRenderer, OneShotError, TuiApp, run_blocking, run_streaming};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "ask-debug.log";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli)?;
    info!("Starting ask");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let models = config.models.parse_available()?;
    let model = match &cli.model {
        Some(name) => Model::new(name.as_str())?,
        None => config.models.parse_default()?,
    };
    info!("Using model {}", model);

    // === Dependency Injection ===
    let api_key = ApiKey::from_env(&config.provider.api_key_env)?;
    let transport = Arc::new(OpenRouterTransport::new(
        OpenRouterSettings::from(&config.provider),
        api_key,
        config.stream,
    )?);

    match cli.question.as_deref() {
        Some(question) => run_one_shot(&cli, &config, transport, model, question).await,
        None => {
            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let controller = SessionController::new(transport, model, ui_tx);
            let mut app = TuiApp::new(controller, ui_rx, models);
            app.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_one_shot(
    cli: &Cli,
    config: &FileConfig,
    transport: Arc<OpenRouterTransport>,
    model: Model,
    question: &str,
) -> Result<ExitCode> {
    if !config.output.color {
        colored::control::set_override(false);
    }

    let mut renderer = ConsoleRenderer::stdout(model.clone());
    if !std::io::stderr().is_terminal() {
        renderer = renderer.without_spinner();
    }

    let result = if cli.no_stream {
        run_blocking(transport.as_ref(), &model, &mut renderer, question).await
    } else {
        let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
        let transport: Arc<dyn StreamTransport> = transport;
        let mut controller = SessionController::new(transport, model, ui_tx);
        run_streaming(&mut controller, &mut ui_rx, &mut renderer, question).await
    };

    exit_code(result)
}

/// Map the result of a single turn onto the process exit code.
fn exit_code(result: Result<String, OneShotError>) -> Result<ExitCode> {
    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // Already printed by the renderer
        Err(OneShotError::Failed(cause)) => {
            warn!("Turn failed: {}", cause);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => bail!(e),
    }
}

/// Install the tracing subscriber.
///
/// The interactive chat owns the terminal, so it logs to a file; single
/// turns log to stderr.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level (RUST_LOG wins when set)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    if cli.is_one_shot() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let (dir, file_name) = split_log_path(&path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// `ask-debug.log` in the platform data directory (or the working directory)
fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("ask"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let Some(file_name) = path.file_name() else {
        bail!("Log file path has no file name: {}", path.display());
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}
