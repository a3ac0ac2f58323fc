//! Configuration for the session manager.

use hawser_types::NetworkId;
use serde::{Deserialize, Serialize};

/// Session manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Network the application operates on. A wallet observed on any other
    /// network (or with no network at all) fails validation.
    pub required_network: NetworkId,

    /// Capacity of the identity-change queue. Raised to 1 if set to 0.
    #[serde(default = "default_change_queue_capacity")]
    pub change_queue_capacity: usize,

    /// Capacity of the session-event broadcast channel. Raised to 1 if set
    /// to 0.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl SessionConfig {
    pub fn new(required_network: NetworkId) -> Self {
        Self {
            required_network,
            change_queue_capacity: default_change_queue_capacity(),
            event_capacity: default_event_capacity(),
        }
    }
}

fn default_change_queue_capacity() -> usize {
    16
}

fn default_event_capacity() -> usize {
    64
}
