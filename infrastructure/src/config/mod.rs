//! Configuration file loading for ask
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ASK_` environment variables (nested keys separated by `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./ask.toml` or `./.ask.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/ask/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileModelsConfig, FileOutputConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
