//! Infrastructure layer for ask
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod openrouter;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileModelsConfig, FileOutputConfig,
    FileProviderConfig,
};
pub use openrouter::{
    error::TransportError,
    transport::{ApiKey, OpenRouterSettings, OpenRouterTransport},
};
