//! NCEI authority tables.
//!
//! The glider DAC checks compare a handful of global attributes against
//! allow-lists maintained by NCEI: projects, platforms, instruments,
//! institutions and sea names. Each table is read from a local fallback file
//! when one is configured, otherwise fetched over HTTP, then parsed into a
//! set of strings.
//!
//! Loading never fails: a table that cannot be read, fetched or parsed is
//! logged and left unavailable. Checks that need it get
//! [`GliderError::TableUnavailable`](glider_common::GliderError) from
//! [`AuthorityTables::get`].

mod error;
mod fetcher;
mod kind;
mod parse;
mod sources;
mod tables;

pub use error::TableParseError;
pub use fetcher::ResourceFetcher;
pub use kind::TableKind;
pub use parse::{parse_line_table, parse_sea_names_xml};
pub use sources::{TableSources, DEFAULT_TIMEOUT, NGDAC_BASE_URL, SEA_NAMES_URL};
pub use tables::AuthorityTables;
