//! The stateful core: owns the last-known script snapshot and the scheduler,
//! and turns each tick into exactly one `update`, `no-update` or `error`
//! event.
//!
//! ## Failure semantics
//! - A failed initial fetch aborts construction: `error` is published once and
//!   the factory returns [`Error::Initialization`]; no timer is ever started.
//! - A failed tick is reported through `error` only. The snapshot and the
//!   schedule are left untouched, so the next successful tick compares against
//!   the last good snapshot.
//!
//! ## Overlapping ticks
//! Ticks run as independent tasks. A tick whose fetch outlives the interval
//! may overlap the next one; the snapshot is an [`ArcSwap`] so each write is a
//! single atomic replace. `stop()` prevents future ticks but lets a tick that
//! already fired finish and publish.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::extract_scripts;
use crate::scripts_changed;
use crate::ContentSource;
use crate::Emitter;
use crate::Error;
use crate::FetchError;
use crate::ListenerId;
use crate::Notifier;
use crate::PageEvent;
use crate::PageEventKind;
use crate::Result;
use crate::Scheduler;
use crate::WatchConfig;
use crate::WatchState;

/// Script tags captured from one fetch, in document order.
pub type Snapshot = Vec<String>;

pub(crate) type PageEmitter = Emitter<PageEventKind, PageEvent>;

/// State shared with scheduled ticks.
pub(crate) struct WatcherInner {
    pub(crate) config: WatchConfig,
    source: Arc<dyn ContentSource>,
    snapshot: ArcSwap<Snapshot>,
    pub(crate) emitter: PageEmitter,
}

struct Lifecycle {
    state: WatchState,
    scheduler: Scheduler,
}

/// Watches a page for changes to its script set.
///
/// Obtain one through [`Watcher::create`] or [`crate::WatcherBuilder`]; both
/// only hand out a watcher whose initial snapshot was captured successfully.
/// Dropping the watcher cancels its schedule.
pub struct Watcher {
    inner: Arc<WatcherInner>,
    lifecycle: Mutex<Lifecycle>,
}

impl Watcher {
    /// Creates and initializes a watcher without pre-registered listeners.
    pub async fn create(
        config: WatchConfig,
        source: Arc<dyn ContentSource>,
    ) -> Result<Self> {
        crate::WatcherBuilder::new(config).content_source(source).build().await
    }

    /// First construction phase. Cannot fail and starts nothing.
    pub(crate) fn new(
        config: WatchConfig,
        source: Arc<dyn ContentSource>,
        emitter: PageEmitter,
    ) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                config,
                source,
                snapshot: ArcSwap::from_pointee(Vec::new()),
                emitter,
            }),
            lifecycle: Mutex::new(Lifecycle {
                state: WatchState::Uninitialized,
                scheduler: Scheduler::new(),
            }),
        }
    }

    /// Second construction phase: seeds the snapshot and starts polling.
    pub(crate) async fn init(&self) -> Result<()> {
        self.lifecycle.lock().state = WatchState::Initializing;

        match self.inner.fetch_scripts().await {
            Ok(scripts) => {
                info!(scripts = scripts.len(), "Page Watchdog initialized");
                self.inner.snapshot.store(Arc::new(scripts));
                self.start_polling()
            }
            Err(e) => {
                let e = Arc::new(e);
                error!("Page Watchdog initialization failed: {}", e);
                self.inner.publish(PageEvent::Error(e.clone()));
                Err(Error::Initialization(e))
            }
        }
    }

    fn start_polling(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock();
        let inner = self.inner.clone();
        lifecycle
            .scheduler
            .start(move || inner.clone().check_for_updates(), self.inner.config.interval())?;
        lifecycle.state = WatchState::Active;
        debug!(interval_ms = self.inner.config.poll_interval_ms, "polling started");
        Ok(())
    }

    /// Registers `listener` for `kind`. Listeners for the same kind run in
    /// subscription order.
    ///
    /// # Errors
    /// Returns [`Error::WatcherStopped`] once [`Watcher::stop`] was called.
    pub fn subscribe<F>(
        &self,
        kind: PageEventKind,
        listener: F,
    ) -> Result<ListenerId>
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        if self.state() == WatchState::Stopped {
            warn!(%kind, "subscribe called on a stopped watcher");
            return Err(Error::WatcherStopped);
        }
        Ok(self.inner.emitter.subscribe(kind, listener))
    }

    pub fn unsubscribe(
        &self,
        id: ListenerId,
    ) -> bool {
        self.inner.emitter.unsubscribe(id)
    }

    /// Cancels future ticks. Idempotent; the watcher cannot be restarted.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state == WatchState::Stopped {
            return;
        }
        lifecycle.scheduler.stop();
        lifecycle.state = WatchState::Stopped;
        info!("Page Watchdog stopped");
    }

    pub fn state(&self) -> WatchState {
        self.lifecycle.lock().state
    }

    /// Last known script snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.load_full()
    }

    pub fn config(&self) -> &WatchConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for Watcher {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("state", &self.state())
            .field("config", &self.inner.config)
            .field("scripts", &self.inner.snapshot.load().len())
            .finish()
    }
}

impl WatcherInner {
    /// Fetches and extracts. A panicking source is normalized into
    /// [`FetchError::Unknown`].
    async fn fetch_scripts(&self) -> Result<Snapshot> {
        let fetch = async { self.source.fetch_current_document(self.config.disable_cache).await };
        let html = AssertUnwindSafe(fetch)
            .catch_unwind()
            .await
            .map_err(FetchError::from_panic)??;
        Ok(extract_scripts(&html))
    }

    /// One fetch -> extract -> compare -> notify cycle.
    pub(crate) async fn check_for_updates(self: Arc<Self>) {
        match self.fetch_scripts().await {
            Ok(fresh) => {
                let changed = {
                    let current = self.snapshot.load();
                    scripts_changed(current.as_slice(), fresh.as_slice())
                };

                if changed {
                    info!(scripts = fresh.len(), "Page scripts changed");
                    self.snapshot.store(Arc::new(fresh));
                    self.publish(PageEvent::Update);
                } else {
                    debug!("Page scripts unchanged");
                    self.publish(PageEvent::NoUpdate);
                }
            }
            Err(e) => {
                error!("Page Watchdog failed to check for updates: {}", e);
                self.publish(PageEvent::Error(Arc::new(e)));
            }
        }
    }

    fn publish(
        &self,
        event: PageEvent,
    ) {
        self.emitter.publish(&event.kind(), &event);
    }
}
