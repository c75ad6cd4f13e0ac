//! Stream policy — how strictly a streamed reply is decoded.

use serde::{Deserialize, Serialize};

/// Policy applied by transports while decoding one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPolicy {
    /// Malformed `data:` payloads skipped before the stream fails with a
    /// decode error. With the default of 1 the first bad payload is skipped
    /// and the second one is fatal.
    pub malformed_line_tolerance: u32,
    /// Capacity of the event channel between producer and consumer.
    pub channel_capacity: usize,
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self {
            malformed_line_tolerance: 1,
            channel_capacity: 64,
        }
    }
}

impl StreamPolicy {
    pub fn with_malformed_line_tolerance(mut self, tolerance: u32) -> Self {
        self.malformed_line_tolerance = tolerance;
        self
    }
}
