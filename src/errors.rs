//! Page Watchdog Error Hierarchy
//!
//! Every failure that reaches an `error` listener or a caller of the
//! watcher factory is expressed as [`Error`], so subscribers always receive
//! one consistent shape regardless of where the failure originated.

use std::any::Any;
use std::sync::Arc;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading failures (file parsing, env overlay)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration values rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Content acquisition failures
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The initial fetch failed; the same failure was delivered to `error` listeners
    #[error("Page Watchdog initialization failed: {0}")]
    Initialization(#[source] Arc<Error>),

    /// Operation attempted on a watcher that has already been stopped
    #[error("Watcher has been stopped")]
    WatcherStopped,

    /// OS level failures (signal registration)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Endpoint could not be parsed as an absolute URL
    #[error("Invalid endpoint URL {url}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, timeout or body decoding failures
    #[error("Failed to fetch HTML: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Failed to fetch HTML: {status} {reason}")]
    Status { status: u16, reason: String },

    /// A content source failed with something that was not an error value
    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Normalizes a panic payload caught around a content source call.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        FetchError::Unknown(panic_message(payload.as_ref()).to_string())
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
