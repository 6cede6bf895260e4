//! Fallback-file-then-HTTP resource loading.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::Duration;

use glider_common::{GliderError, GliderResult};
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::sources::DEFAULT_TIMEOUT;

/// Loads a text resource and parses it, degrading every failure to `None`.
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    client: Client,
}

impl ResourceFetcher {
    pub fn new(timeout: Duration) -> GliderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GliderError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> GliderResult<Self> {
        Self::new(DEFAULT_TIMEOUT)
    }

    /// Read `fallback` if given, otherwise GET `url`, then apply `parse`.
    ///
    /// An unreadable fallback falls through to the network. Request failures,
    /// non-success statuses and parse errors are logged and yield `None`.
    pub fn load_resource<T, E, F>(&self, url: &str, fallback: Option<&Path>, parse: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Display,
    {
        let content = fallback
            .and_then(|path| match fs::read_to_string(path) {
                Ok(text) => {
                    debug!(path = %path.display(), "Read fallback resource");
                    Some(text)
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Could not open fallback resource, falling back to web request"
                    );
                    None
                }
            })
            .or_else(|| self.fetch(url));

        let Some(content) = content else {
            warn!(url = %url, "Resource unavailable");
            return None;
        };

        match parse(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url = %url, error = %e, "Could not deserialize input text");
                None
            }
        }
    }

    fn fetch(&self, url: &str) -> Option<String> {
        debug!(url = %url, "Fetching resource");

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Request failed while fetching resource");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Resource request returned an error status");
            return None;
        }

        match response.text() {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read resource body");
                None
            }
        }
    }
}
