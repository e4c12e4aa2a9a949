use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;
use crate::DEFAULT_POLL_INTERVAL_MS;

/// Polling parameters, captured once when a watcher is created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Delay between two consecutive checks, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Append a cache-busting query parameter to every fetch
    #[serde(default = "default_disable_cache")]
    pub disable_cache: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            disable_cache: default_disable_cache(),
        }
    }
}

impl WatchConfig {
    pub fn with_poll_interval_ms(
        mut self,
        poll_interval_ms: u64,
    ) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_disable_cache(
        mut self,
        disable_cache: bool,
    ) -> Self {
        self.disable_cache = disable_cache;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// # Errors
    /// Returns `Error::InvalidConfig` when the poll interval is zero
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig("poll_interval_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
fn default_disable_cache() -> bool {
    true
}
