//! A builder for constructing a fully initialized [`Watcher`].
//!
//! Construction happens in two phases: assembling the parts cannot fail,
//! while [`WatcherBuilder::build`] performs the first fetch and only returns a
//! watcher once that fetch succeeded.
//!
//! ## Example
//! ```ignore
//! let watcher = WatcherBuilder::from_config(WatchdogConfig::new()?.validate()?)
//!     .subscribe(PageEventKind::Update, |_| info!("reload"))
//!     .subscribe(PageEventKind::Error, |e| warn!("{:?}", e.error()))
//!     .build()
//!     .await?;
//! ```
//!
//! ## Notes
//! - **Default Components**: Without [`WatcherBuilder::content_source`] an
//!   [`HttpContentSource`] is created from the fetch configuration.
//! - **Early listeners**: Listeners registered here are in place before the
//!   first fetch, so they observe an initialization `error` event.

use std::sync::Arc;

use tracing::debug;

use super::watcher::PageEmitter;
use crate::ContentSource;
use crate::FetchConfig;
use crate::HttpContentSource;
use crate::Notifier;
use crate::PageEvent;
use crate::PageEventKind;
use crate::Result;
use crate::WatchConfig;
use crate::Watcher;
use crate::WatchdogConfig;

pub struct WatcherBuilder {
    watch_config: WatchConfig,
    fetch_config: FetchConfig,
    source: Option<Arc<dyn ContentSource>>,
    emitter: PageEmitter,
}

impl WatcherBuilder {
    /// Starts a builder for the given polling parameters. The content source
    /// defaults to HTTP with [`FetchConfig::default`].
    pub fn new(watch_config: WatchConfig) -> Self {
        Self {
            watch_config,
            fetch_config: FetchConfig::default(),
            source: None,
            emitter: PageEmitter::new(),
        }
    }

    /// Starts a builder from a complete, loaded configuration.
    pub fn from_config(config: WatchdogConfig) -> Self {
        Self::new(config.watch).fetch_config(config.fetch)
    }

    pub fn fetch_config(
        mut self,
        fetch_config: FetchConfig,
    ) -> Self {
        self.fetch_config = fetch_config;
        self
    }

    /// Overrides the default HTTP content source.
    pub fn content_source(
        mut self,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        self.source = Some(source);
        self
    }

    pub fn subscribe<F>(
        self,
        kind: PageEventKind,
        listener: F,
    ) -> Self
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        self.emitter.subscribe(kind, listener);
        self
    }

    /// Validates the configuration, performs the initial fetch and starts
    /// polling.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` for a zero poll interval, or a bad endpoint when
    ///   the default HTTP source is used; no event is published
    /// - `Error::Initialization` when the first fetch fails, after `error`
    ///   listeners received the same failure
    pub async fn build(self) -> Result<Watcher> {
        self.watch_config.validate()?;

        let source = match self.source {
            Some(source) => source,
            None => {
                self.fetch_config.validate()?;
                debug!(endpoint = %self.fetch_config.endpoint, "using HTTP content source");
                Arc::new(HttpContentSource::new(&self.fetch_config)?)
            }
        };

        let watcher = Watcher::new(self.watch_config, source, self.emitter);
        watcher.init().await?;
        Ok(watcher)
    }
}
