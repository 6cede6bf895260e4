//! Checker options and configuration.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use authority_tables::{TableKind, TableSources};
use glider_common::{GliderError, GliderResult};
use serde::Deserialize;
use tracing::debug;

const IGNORE_ATTRIBUTES: &str = "ignore_attributes";

/// Options passed by the host as plain strings.
///
/// `ignore_attributes:a,b,c` exempts attributes from the attribute checks
/// that honour it. A bare `ignore_attributes` ignores nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerOptions {
    ignore_attributes: HashSet<String>,
}

impl CheckerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::default();
        for option in options {
            let option = option.as_ref().trim();
            match option.split_once(':') {
                Some((IGNORE_ATTRIBUTES, list)) => {
                    parsed.ignore_attributes.extend(
                        list.split(',')
                            .map(str::trim)
                            .filter(|attr| !attr.is_empty())
                            .map(str::to_string),
                    );
                }
                None if option == IGNORE_ATTRIBUTES => {}
                _ => debug!(option, "Ignoring unknown checker option"),
            }
        }
        parsed
    }

    pub fn with_ignored_attribute(mut self, attr: impl Into<String>) -> Self {
        self.ignore_attributes.insert(attr.into());
        self
    }

    pub fn ignore_attributes(&self) -> &HashSet<String> {
        &self.ignore_attributes
    }
}

/// Checker configuration, usually read from YAML.
///
/// ```yaml
/// options:
///   - ignore_attributes:ancillary_variables
/// table_overrides:
///   sea_name: /data/seanames.xml
/// request_timeout_secs: 5
/// ```
///
/// Fallback files named in the environment take precedence over
/// `table_overrides`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub options: Vec<String>,
    pub table_overrides: HashMap<String, PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub sea_names_url: Option<String>,
}

impl CheckerConfig {
    pub fn from_yaml_str(yaml: &str) -> GliderResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GliderError::Config(format!("Invalid checker configuration: {}", e)))
    }

    pub fn from_yaml_file(path: &Path) -> GliderResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn checker_options(&self) -> CheckerOptions {
        CheckerOptions::parse(&self.options)
    }

    /// Table sources from this configuration, then the environment.
    pub fn table_sources(&self) -> GliderResult<TableSources> {
        Ok(self.configured_sources()?.with_env_overrides())
    }

    fn configured_sources(&self) -> GliderResult<TableSources> {
        let mut sources = TableSources::default();
        if let Some(url) = &self.base_url {
            sources = sources.with_base_url(url.as_str());
        }
        if let Some(url) = &self.sea_names_url {
            sources = sources.with_sea_names_url(url.as_str());
        }
        if let Some(secs) = self.request_timeout_secs {
            sources = sources.with_timeout(Duration::from_secs(secs));
        }
        for (name, path) in &self.table_overrides {
            let kind: TableKind = name.parse().map_err(GliderError::Config)?;
            sources = sources.with_fallback(kind, path.clone());
        }
        Ok(sources)
    }
}
