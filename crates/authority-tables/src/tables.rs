use std::collections::{HashMap, HashSet};

use glider_common::{GliderError, GliderResult};
use tracing::{debug, warn};

use crate::fetcher::ResourceFetcher;
use crate::kind::TableKind;
use crate::sources::TableSources;

/// The loaded authority tables. A kind with no entry is unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorityTables {
    tables: HashMap<TableKind, HashSet<String>>,
}

impl AuthorityTables {
    /// Load every table once from its fallback file or URL.
    pub fn load(sources: &TableSources, fetcher: &ResourceFetcher) -> Self {
        let mut tables = HashMap::new();
        for kind in TableKind::ALL {
            let url = sources.url(kind);
            match fetcher.load_resource(&url, sources.fallback(kind), |text| kind.parse(text)) {
                Some(table) => {
                    debug!(table = %kind, entries = table.len(), "Loaded authority table");
                    tables.insert(kind, table);
                }
                None => warn!(table = %kind, url = %url, "Authority table unavailable"),
            }
        }
        Self { tables }
    }

    pub fn with_table<I, S>(mut self, kind: TableKind, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.insert(kind, entries.into_iter().map(Into::into).collect());
        self
    }

    /// Mark a table as unavailable.
    pub fn without_table(mut self, kind: TableKind) -> Self {
        self.tables.remove(&kind);
        self
    }

    pub fn is_available(&self, kind: TableKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// The table, or `TableUnavailable` if it could not be loaded.
    pub fn get(&self, kind: TableKind) -> GliderResult<&HashSet<String>> {
        self.tables
            .get(&kind)
            .ok_or_else(|| GliderError::TableUnavailable(kind.to_string()))
    }

    pub fn contains(&self, kind: TableKind, value: &str) -> GliderResult<bool> {
        Ok(self.get(kind)?.contains(value))
    }
}
