use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::TableParseError;
use crate::parse::{parse_line_table, parse_sea_names_xml};

/// The authority tables consulted by the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Project,
    Platform,
    Instrument,
    Institution,
    SeaName,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Project,
        TableKind::Platform,
        TableKind::Instrument,
        TableKind::Institution,
        TableKind::SeaName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Project => "project",
            TableKind::Platform => "platform",
            TableKind::Instrument => "instrument",
            TableKind::Institution => "institution",
            TableKind::SeaName => "sea_name",
        }
    }

    /// Environment variable naming a local fallback file.
    pub fn env_var(self) -> &'static str {
        match self {
            TableKind::Project => "PROJECT_TABLE",
            TableKind::Platform => "PLATFORM_TABLE",
            TableKind::Instrument => "INSTRUMENT_TABLE",
            TableKind::Institution => "INSTITUTION_TABLE",
            TableKind::SeaName => "SEA_NAME_TABLE",
        }
    }

    /// File name of the table under its base URL.
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Project => "projects.txt",
            TableKind::Platform => "platforms.txt",
            TableKind::Instrument => "instruments.txt",
            TableKind::Institution => "institutions.txt",
            TableKind::SeaName => "seanames.xml",
        }
    }

    /// Parse the raw table text.
    pub fn parse(self, text: &str) -> Result<HashSet<String>, TableParseError> {
        match self {
            TableKind::SeaName => parse_sea_names_xml(text),
            _ => Ok(parse_line_table(text)),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown authority table: {}", s))
    }
}
