use std::fmt;
use std::sync::Arc;

use crate::Error;

/// Names under which listeners subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    /// The unique script set differs from the last snapshot
    Update,
    /// The unique script set is identical to the last snapshot
    NoUpdate,
    /// A fetch failed
    Error,
}

impl PageEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageEventKind::Update => "update",
            PageEventKind::NoUpdate => "no-update",
            PageEventKind::Error => "error",
        }
    }
}

impl fmt::Display for PageEventKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to listeners.
///
/// `Update` and `NoUpdate` carry nothing; `Error` carries the failure shared
/// by every listener of that publish.
#[derive(Debug, Clone)]
pub enum PageEvent {
    Update,
    NoUpdate,
    Error(Arc<Error>),
}

impl PageEvent {
    pub fn kind(&self) -> PageEventKind {
        match self {
            PageEvent::Update => PageEventKind::Update,
            PageEvent::NoUpdate => PageEventKind::NoUpdate,
            PageEvent::Error(_) => PageEventKind::Error,
        }
    }

    pub fn error(&self) -> Option<&Arc<Error>> {
        match self {
            PageEvent::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Lifecycle of a [`crate::Watcher`].
///
/// `Active` is the only state with a live timer and `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Uninitialized,
    Initializing,
    Active,
    Stopped,
}
