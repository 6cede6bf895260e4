//! Local HTTP server for resource fetch tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tiny_http::{Method, Response, Server, StatusCode};

/// Serves fixed bodies by path and records every request.
///
/// Unknown paths answer 404. The server stops when dropped.
pub struct TableServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TableServer {
    pub fn start<I, P, B>(routes: I) -> Self
    where
        I: IntoIterator<Item = (P, B)>,
        P: Into<String>,
        B: Into<String>,
    {
        let routes: HashMap<String, String> = routes
            .into_iter()
            .map(|(path, body)| (path.into(), body.into()))
            .collect();

        let server = Server::http("127.0.0.1:0").expect("http server");
        let addr = server.server_addr().to_ip().expect("ip listen address");
        let base_url = format!("http://{}", addr);

        let requests = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let requests_clone = Arc::clone(&requests);
        let paths_clone = Arc::clone(&paths);
        let stop_clone = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !stop_clone.load(Ordering::Relaxed) {
                let req = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };
                requests_clone.fetch_add(1, Ordering::Relaxed);
                let url = req.url().to_string();
                paths_clone.lock().expect("paths lock").push(url.clone());

                if req.method() != &Method::Get {
                    let _ = req.respond(Response::empty(StatusCode(405)));
                    continue;
                }
                match routes.get(&url) {
                    Some(body) => {
                        let _ = req.respond(Response::from_string(body.clone()));
                    }
                    None => {
                        let _ = req.respond(Response::empty(StatusCode(404)));
                    }
                }
            }
        });

        Self {
            base_url,
            requests,
            paths,
            stop,
            handle: Some(handle),
        }
    }

    /// Server serving [`crate::table_routes`].
    pub fn with_fixture_tables() -> Self {
        Self::start(crate::table_routes())
    }

    /// `http://127.0.0.1:<port>` without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Total number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Requested paths in arrival order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths lock").clone()
    }
}

impl Drop for TableServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
