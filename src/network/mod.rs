//! Content acquisition layer.
//!
//! The watcher only depends on [`ContentSource`]; [`HttpContentSource`] is the
//! production implementation backed by `reqwest`.
mod http_source;
pub use http_source::*;


use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentSource: Send + Sync + 'static {
    /// Fetches the current markup of the watched page.
    ///
    /// # Arguments
    /// * `disable_cache` - When true the request must not be answerable from
    ///   any intermediary or client cache. When false default caching applies.
    ///
    /// # Errors
    /// - Returns [`crate::FetchError::Transport`] on connection or body failures
    /// - Returns [`crate::FetchError::Status`] for any non-success response; such a
    ///   response is never surfaced as document text
    async fn fetch_current_document(
        &self,
        disable_cache: bool,
    ) -> Result<String>;
}
