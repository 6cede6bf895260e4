//! IOOS glider DAC compliance checks.
//!
//! [`GliderCheck`] scores an opened glider NetCDF file, seen through the
//! [`Dataset`](glider_common::Dataset) trait, against the NGDAC file format:
//! required variables and dimensions, variable and global attributes, data
//! types, profile data sanity, QARTOD flag variables and the NCEI authority
//! tables.
//!
//! ```no_run
//! use glider_checks::{CheckerConfig, GliderCheck};
//! use glider_common::MemoryDataset;
//!
//! let checker = GliderCheck::new(&CheckerConfig::default())?;
//! let report = checker.run_all(&MemoryDataset::new());
//! println!("{}", report.to_json().unwrap_or_default());
//! # Ok::<(), glider_common::GliderError>(())
//! ```

mod checker;
mod checks;
pub mod config;
pub mod expected_format;
pub mod report;
pub mod requirements;
pub mod validate;

pub use checker::GliderCheck;
pub use checks::{
    QARTOD_PARAMETERS, QARTOD_TESTS, QC_VARIABLES, REQUIRED_DIMENSIONS,
    REQUIRED_GLOBAL_ATTRIBUTES, REQUIRED_VARIABLES,
};
pub use config::{CheckerConfig, CheckerOptions};
pub use report::{CheckEntry, CheckOutcome, SuiteReport};
pub use requirements::{AttributeSpec, AttributeSpecTable};
pub use validate::{check_dtype, validate_attributes};
