//! Detects when a web page's executable script set changes.
//!
//! A [`Watcher`] periodically re-fetches a page, extracts its `<script>`
//! tags and compares the unique set against the previous snapshot. Each
//! check ends with exactly one event: `update` when the set changed,
//! `no-update` when it did not, or `error` when the fetch failed. A failed
//! check never stops polling; a failed initial fetch aborts creation.
//!
//! ```ignore
//! let watcher = WatcherBuilder::from_config(WatchdogConfig::new()?.validate()?)
//!     .subscribe(PageEventKind::Update, |_| println!("new deploy detected"))
//!     .build()
//!     .await?;
//! ```

mod config;
mod constants;
mod core;
mod errors;
mod network;
mod watcher;
pub mod utils;

pub use config::*;
pub(crate) use constants::*;
pub use crate::core::*;
pub use errors::*;
pub use network::*;
pub use watcher::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
