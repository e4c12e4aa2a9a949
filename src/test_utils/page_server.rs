use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use warp::http::StatusCode;
use warp::Filter;

/// Local HTTP server serving one mutable page at `/`.
///
/// Must be started from within a tokio runtime.
pub struct PageServer {
    pub addr: SocketAddr,
    body: Arc<Mutex<String>>,
    status: Arc<Mutex<u16>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl PageServer {
    pub fn start(initial_body: &str) -> Self {
        let body = Arc::new(Mutex::new(initial_body.to_string()));
        let status = Arc::new(Mutex::new(200u16));
        let queries = Arc::new(Mutex::new(Vec::new()));

        let (b, s, q) = (body.clone(), status.clone(), queries.clone());
        let route = warp::path::end()
            .and(warp::query::raw().or(warp::any().map(String::new)).unify())
            .map(move |query: String| {
                q.lock().push(query);
                let code = StatusCode::from_u16(*s.lock()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warp::reply::with_status(warp::reply::html(b.lock().clone()), code)
            });

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self {
            addr,
            body,
            status,
            queries,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn set_body(
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

    /// Raw query strings of every request received, empty when none was sent.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}
