//! Error types for the OpenRouter adapter

use thiserror::Error;

/// Result type alias for transport setup
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised while building the transport, before any request is sent
///
/// Failures of individual requests are reported as
/// [`GatewayError`](ask_application::GatewayError)s instead.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("API key not found: set the {0} environment variable")]
    CredentialMissing(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
