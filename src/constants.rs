// -
// Polling defaults

/// Interval used when no `poll_interval_ms` is configured
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

/// Query parameter appended to the endpoint when caching is disabled
pub(crate) const CACHE_BUST_PARAM: &str = "_";

// -
// Configuration sources

/// Prefix of environment variables overriding config values, e.g. `WATCHDOG__WATCH__POLL_INTERVAL_MS`
pub(crate) const ENV_PREFIX: &str = "WATCHDOG";

/// Environment variable naming an optional config file
pub(crate) const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
