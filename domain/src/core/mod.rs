//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — the provider model identifier a turn is sent to
//! - [`prompt::Prompt`] — a validated, non-blank user prompt
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod prompt;
