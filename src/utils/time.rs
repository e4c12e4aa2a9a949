use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

static LAST_CACHE_BUST_STAMP: AtomicU64 = AtomicU64::new(0);

/// return millisecond
pub fn timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Current unix time in milliseconds, bumped when needed so that no two
/// calls in this process ever return the same value.
pub fn cache_bust_stamp() -> u64 {
    let now = timestamp_millis();
    let previous = match LAST_CACHE_BUST_STAMP.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(previous) | Err(previous) => previous,
    };
    now.max(previous + 1)
}
