//! Check implementations, grouped by what they inspect.

mod data;
mod globals;
mod ncei;
mod qartod;
mod variables;

pub use globals::REQUIRED_GLOBAL_ATTRIBUTES;
pub use qartod::{QARTOD_PARAMETERS, QARTOD_TESTS};
pub use variables::{QC_VARIABLES, REQUIRED_DIMENSIONS, REQUIRED_VARIABLES};
