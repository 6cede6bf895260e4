//! Common types shared by the glider DAC compliance crates.
//!
//! The checks never open files themselves: they work against the read-only
//! [`Dataset`] trait, which hosts implement for whatever handle they hold.
//! [`MemoryDataset`] is the in-memory implementation used by adapters and
//! tests.

pub mod attribute;
pub mod dataset;
pub mod dtype;
pub mod error;
pub mod score;

pub use attribute::AttrValue;
pub use dataset::{Dataset, MemoryDataset, Variable};
pub use dtype::{dtype_equal, ByteOrder, DType, TypeKind};
pub use error::{GliderError, GliderResult};
pub use score::{CheckResult, Priority, Tally};
