//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! implement or consume.

pub mod stream_transport;
pub mod ui_event;
