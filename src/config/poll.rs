use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Fixed-cadence polling policy for leader discovery.
///
/// A plain bounded retry loop: expected convergence (one election round) is
/// small, so a fixed tick beats backoff machinery here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PollPolicy {
    /// Overall convergence deadline (unit: milliseconds)
    #[serde(default = "default_wait_for_ms")]
    pub wait_for_ms: u64,

    /// Interval between two leadership scans (unit: milliseconds)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            wait_for_ms: default_wait_for_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl PollPolicy {
    pub fn wait_for(&self) -> Duration {
        Duration::from_millis(self.wait_for_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_wait_for_ms() -> u64 {
    5000
}
fn default_tick_interval_ms() -> u64 {
    50
}
