//! Application-level configuration.
//!
//! - [`StreamPolicy`] — tolerance and buffering knobs for streamed turns

pub mod stream_policy;

pub use stream_policy::StreamPolicy;
