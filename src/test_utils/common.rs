use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Error;
use crate::FetchError;
use crate::MockContentSource;
use crate::PageEvent;
use crate::PageEventKind;
use crate::WatcherBuilder;

pub const SCRIPT_A: &str = r#"<script src="a.js"></script>"#;
pub const SCRIPT_B: &str = r#"<script src="b.js"></script>"#;

/// Wraps script tags in a minimal page.
pub fn page(scripts: &[&str]) -> String {
    format!("<html><head>{}</head><body></body></html>", scripts.concat())
}

/// One scripted response of [`scripted_source`].
#[derive(Debug, Clone)]
pub enum Step {
    Html(String),
    /// Fails with a 503 status
    Fail,
    Panic(&'static str),
}

/// A content source answering with `steps` in order; the last step repeats
/// forever. Also returns the number of fetches performed so far.
pub fn scripted_source(steps: Vec<Step>) -> (MockContentSource, Arc<Mutex<usize>>) {
    assert!(!steps.is_empty(), "at least one step is required");
    let queue = Mutex::new(VecDeque::from(steps));
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();

    let mut source = MockContentSource::new();
    source.expect_fetch_current_document().returning(move |_disable_cache| {
        *counter.lock() += 1;
        let step = {
            let mut queue = queue.lock();
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        };
        match step {
            Some(Step::Html(html)) => Ok(html),
            Some(Step::Fail) | None => Err(Error::Fetch(FetchError::Status {
                status: 503,
                reason: "Service Unavailable".to_string(),
            })),
            Some(Step::Panic(message)) => panic!("{}", message),
        }
    });
    (source, calls)
}

/// Records every event published to the listeners it hands out.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<PageEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> impl Fn(&PageEvent) + Send + Sync + 'static {
        let events = self.events.clone();
        move |event: &PageEvent| events.lock().push(event.clone())
    }

    /// Subscribes to all three event kinds on `builder`.
    pub fn attach(
        &self,
        builder: WatcherBuilder,
    ) -> WatcherBuilder {
        builder
            .subscribe(PageEventKind::Update, self.listener())
            .subscribe(PageEventKind::NoUpdate, self.listener())
            .subscribe(PageEventKind::Error, self.listener())
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<PageEventKind> {
        self.events.lock().iter().map(PageEvent::kind).collect()
    }

    pub fn count(
        &self,
        kind: PageEventKind,
    ) -> usize {
        self.events.lock().iter().filter(|e| e.kind() == kind).count()
    }
}
