use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use page_watchdog::FetchConfig;
use page_watchdog::PageEvent;
use page_watchdog::PageEventKind;
use page_watchdog::WatchConfig;
use page_watchdog::WatchdogConfig;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::timeout;
use warp::http::StatusCode;
use warp::Filter;

pub const POLL_INTERVAL_MS: u64 = 50;
pub const WAIT_FOR_EVENT_IN_SEC: u64 = 5;

/// A local page whose body and status can be changed between polls.
pub struct TestSite {
    pub addr: SocketAddr,
    body: Arc<Mutex<String>>,
    status: Arc<Mutex<u16>>,
}

impl TestSite {
    pub fn start(body: &str) -> Self {
        let body = Arc::new(Mutex::new(body.to_string()));
        let status = Arc::new(Mutex::new(200u16));
        let (b, s) = (body.clone(), status.clone());

        let route = warp::path::end().map(move || {
            let code = StatusCode::from_u16(*s.lock()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            warp::reply::with_status(warp::reply::html(b.lock().clone()), code)
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, body, status }
    }

    pub fn deploy(
        &self,
        body: &str,
    ) {
        *self.body.lock() = body.to_string();
    }

    pub fn set_status(
        &self,
        status: u16,
    ) {
        *self.status.lock() = status;
    }

    pub fn config(&self) -> WatchdogConfig {
        WatchdogConfig {
            watch: WatchConfig::default().with_poll_interval_ms(POLL_INTERVAL_MS),
            fetch: FetchConfig {
                endpoint: format!("http://{}/", self.addr),
                ..FetchConfig::default()
            },
        }
    }
}

pub fn html(scripts: &[&str]) -> String {
    format!("<!doctype html><html><head>{}</head><body><div id=\"root\"></div></body></html>", scripts.join("\n"))
}

/// Forwards every event into a channel so tests can await them in order.
pub fn event_channel() -> (impl Fn(&PageEvent) + Send + Sync + Clone + 'static, mpsc::UnboundedReceiver<PageEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let listener = move |event: &PageEvent| {
        let _ = tx.send(event.clone());
    };
    (listener, rx)
}

pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<PageEvent>) -> PageEvent {
    timeout(Duration::from_secs(WAIT_FOR_EVENT_IN_SEC), rx.recv())
        .await
        .expect("timed out waiting for a watcher event")
        .expect("event channel closed")
}

/// Skips events until one of `kind` arrives.
pub async fn wait_for(
    rx: &mut mpsc::UnboundedReceiver<PageEvent>,
    kind: PageEventKind,
) -> PageEvent {
    loop {
        let event = next_event(rx).await;
        if event.kind() == kind {
            return event;
        }
    }
}
