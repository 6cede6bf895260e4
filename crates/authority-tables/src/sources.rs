//! Where each table is read from.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::kind::TableKind;

/// Base URL of the NGDAC line tables.
pub const NGDAC_BASE_URL: &str = "https://www.ncei.noaa.gov/data/oceans/ncei/cfg/ngdac/";

/// URL of the NCEI sea names vocabulary.
pub const SEA_NAMES_URL: &str = "https://www.ncei.noaa.gov/data/oceans/ncei/vocabulary/seanames.xml";

/// Timeout of a single table request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// URLs, local fallback files and request timeout for the authority tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSources {
    pub base_url: String,
    pub sea_names_url: String,
    pub fallbacks: HashMap<TableKind, PathBuf>,
    pub timeout: Duration,
}

impl Default for TableSources {
    fn default() -> Self {
        Self {
            base_url: NGDAC_BASE_URL.to_string(),
            sea_names_url: SEA_NAMES_URL.to_string(),
            fallbacks: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TableSources {
    /// Defaults plus fallback files named by `PROJECT_TABLE`,
    /// `PLATFORM_TABLE`, `INSTRUMENT_TABLE`, `INSTITUTION_TABLE` and
    /// `SEA_NAME_TABLE`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply fallback files from the environment over the current ones.
    pub fn with_env_overrides(mut self) -> Self {
        for kind in TableKind::ALL {
            if let Some(path) = env::var_os(kind.env_var()).filter(|p| !p.is_empty()) {
                debug!(table = %kind, path = ?path, "Using fallback file from environment");
                self.fallbacks.insert(kind, PathBuf::from(path));
            }
        }
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_sea_names_url(mut self, url: impl Into<String>) -> Self {
        self.sea_names_url = url.into();
        self
    }

    pub fn with_fallback(mut self, kind: TableKind, path: impl Into<PathBuf>) -> Self {
        self.fallbacks.insert(kind, path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Remote location of a table.
    pub fn url(&self, kind: TableKind) -> String {
        match kind {
            TableKind::SeaName => self.sea_names_url.clone(),
            _ => format!("{}/{}", self.base_url.trim_end_matches('/'), kind.file_name()),
        }
    }

    pub fn fallback(&self, kind: TableKind) -> Option<&Path> {
        self.fallbacks.get(&kind).map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let sources = TableSources::default();
        assert_eq!(
            sources.url(TableKind::Project),
            "https://www.ncei.noaa.gov/data/oceans/ncei/cfg/ngdac/projects.txt"
        );
        assert_eq!(sources.url(TableKind::SeaName), SEA_NAMES_URL);
        assert_eq!(sources.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let sources = TableSources::default().with_base_url("http://127.0.0.1:8080");
        assert_eq!(
            sources.url(TableKind::Instrument),
            "http://127.0.0.1:8080/instruments.txt"
        );
    }

    #[test]
    fn test_fallbacks() {
        let sources = TableSources::default().with_fallback(TableKind::Platform, "/tmp/platforms.txt");
        assert_eq!(
            sources.fallback(TableKind::Platform),
            Some(Path::new("/tmp/platforms.txt"))
        );
        assert!(sources.fallback(TableKind::Project).is_none());
    }
}
