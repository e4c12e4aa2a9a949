use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval_at;
use tokio::time::Instant;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::trace;

use crate::Error;
use crate::Result;

/// Restartable periodic callback with at most one active timer.
///
/// Every tick spawns the callback's future as its own task, so a slow tick
/// never delays the next one and overlapping ticks are possible. `stop`
/// cancels the timer only; ticks that already fired run to completion.
#[derive(Debug, Default)]
pub struct Scheduler {
    timer: Option<JoinHandle<()>>,
    interval: Option<Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `callback` to run every `interval`, first firing one interval from now.
    ///
    /// An already active schedule is cancelled before the new one is installed.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` for a zero interval; any previous
    /// schedule is left untouched in that case.
    pub fn start<F, Fut>(
        &mut self,
        callback: F,
        interval: Duration,
    ) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(Error::InvalidConfig("scheduler interval must be greater than 0".into()));
        }

        self.stop();

        let first_tick = Instant::now() + interval;
        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!("scheduler tick");
                tokio::spawn(callback());
            }
        });

        debug!(?interval, "scheduler started");
        self.timer = Some(timer);
        self.interval = Some(interval);
        Ok(())
    }

    /// Cancels the active schedule, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!(interval = ?self.interval, "scheduler stopped");
        }
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Interval of the active schedule.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
