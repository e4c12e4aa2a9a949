//! Typed publish/subscribe registry.
//!
//! Listeners are grouped by event key (mirroring a concurrent
//! `key -> Vec<listener>` map) and invoked synchronously, in subscription
//! order, on the publishing task. A listener that panics is isolated: the
//! panic is logged and the remaining listeners for that event still run.

use std::fmt::Debug;
use std::hash::Hash;
use std::panic::catch_unwind;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::error;
use tracing::trace;

use crate::panic_message;

/// Callback stored in the registry.
pub type Listener<P> = Arc<dyn Fn(&P) + Send + Sync + 'static>;

/// Handle returned by `subscribe`, usable to remove that one listener later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The {subscribe, publish} capability.
pub trait Notifier<K, P> {
    /// Appends `listener` to the list for `key`; existing listeners are kept.
    fn subscribe<F>(
        &self,
        key: K,
        listener: F,
    ) -> ListenerId
    where
        F: Fn(&P) + Send + Sync + 'static;

    /// Invokes every listener currently registered for `key`.
    /// A key with no listeners is a silent no-op.
    fn publish(
        &self,
        key: &K,
        payload: &P,
    );
}

struct Registered<P> {
    id: ListenerId,
    listener: Listener<P>,
}

pub struct Emitter<K, P>
where
    K: Eq + Hash,
{
    dispatch: DashMap<K, Vec<Registered<P>>>,
    next_id: AtomicU64,
}

impl<K, P> Emitter<K, P>
where
    K: Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            dispatch: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Removes a single listener. Returns `false` if it was not registered.
    pub fn unsubscribe(
        &self,
        id: ListenerId,
    ) -> bool {
        let mut removed = false;
        self.dispatch.retain(|_key, listeners| {
            let before = listeners.len();
            listeners.retain(|r| r.id != id);
            removed |= listeners.len() != before;
            !listeners.is_empty()
        });
        removed
    }

    pub fn listener_count(
        &self,
        key: &K,
    ) -> usize {
        self.dispatch.get(key).map(|l| l.len()).unwrap_or(0)
    }
}

impl<K, P> Notifier<K, P> for Emitter<K, P>
where
    K: Eq + Hash + Debug,
{
    fn subscribe<F>(
        &self,
        key: K,
        listener: F,
    ) -> ListenerId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        trace!(?key, ?id, "listener subscribed");
        self.dispatch.entry(key).or_default().push(Registered {
            id,
            listener: Arc::new(listener),
        });
        id
    }

    fn publish(
        &self,
        key: &K,
        payload: &P,
    ) {
        // Clone out of the shard so listeners may re-enter the registry.
        let listeners: Vec<Listener<P>> = match self.dispatch.get(key) {
            Some(entry) => entry.iter().map(|r| r.listener.clone()).collect(),
            None => return,
        };

        for listener in listeners {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| (*listener)(payload))) {
                error!(?key, "listener panicked: {}", panic_message(panic.as_ref()));
            }
        }
    }
}

impl<K, P> Default for Emitter<K, P>
where
    K: Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Debug for Emitter<K, P>
where
    K: Eq + Hash + Debug,
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let counts: Vec<(String, usize)> = self
            .dispatch
            .iter()
            .map(|entry| (format!("{:?}", entry.key()), entry.value().len()))
            .collect();
        f.debug_struct("Emitter").field("listeners", &counts).finish_non_exhaustive()
    }
}
