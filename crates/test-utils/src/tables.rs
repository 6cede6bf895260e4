//! Authority table fixtures.
//!
//! A small subset of the NCEI tables, enough for the fixture datasets to
//! pass every membership check.

use std::fs;
use std::path::{Path, PathBuf};

pub const INSTITUTIONS: &str = "MARACOOS
University of Delaware
Woods Hole Oceanographic Institution";

pub const PROJECTS: &str = "MARACOOS";

pub const PLATFORMS: &str = "Test123";

pub const INSTRUMENT_MAKES: &str = "Seabird GCTD
Sea-Bird 41CP
Sea-Bird GCTD
Seabird GPCTD";

pub const SEA_NAMES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<seanames>
  <seaname>
    <seaname>Mid-Atlantic Bight</seaname>
    <seacode>9999</seacode>
  </seaname>
  <seaname>
    <seaname>Gulf of Mexico</seaname>
    <seacode>1520</seacode>
  </seaname>
  <seaname>
    <seaname>North Atlantic Ocean</seaname>
    <seacode>1904</seacode>
  </seaname>
  <seaname>
    <seaname>Coastal Waters of Florida</seaname>
    <seacode>9998</seacode>
  </seaname>
</seanames>
"#;

/// `(path, body)` routes serving every fixture table under `/`.
pub fn table_routes() -> Vec<(String, String)> {
    vec![
        ("/projects.txt".to_string(), PROJECTS.to_string()),
        ("/platforms.txt".to_string(), PLATFORMS.to_string()),
        ("/instruments.txt".to_string(), INSTRUMENT_MAKES.to_string()),
        ("/institutions.txt".to_string(), INSTITUTIONS.to_string()),
        ("/seanames.xml".to_string(), SEA_NAMES_XML.to_string()),
    ]
}

/// Write a fixture file into `dir` and return its path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture file");
    path
}

/// A temporary directory holding every fixture table under its NCEI file name.
pub fn fixture_table_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (route, body) in table_routes() {
        write_fixture(dir.path(), route.trim_start_matches('/'), &body);
    }
    dir
}
