//! Labeled-array host kinds.
//!
//! # Responsibility
//! - Define the two types that accessors attach to: `DataArray` and `Dataset`.
//! - Keep accessor slot storage private to each instance.
//!
//! # Invariants
//! - Dimension names of one `DataArray` are unique.
//! - Accessor slots never participate in equality or serialization.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod data_array;
pub mod dataset;

pub use data_array::DataArray;
pub use dataset::Dataset;

pub type ModelResult<T> = Result<T, ModelError>;

/// Host data invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    DuplicateDimension(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDimension(dim) => write!(f, "dimension listed more than once: {dim}"),
        }
    }
}

impl Error for ModelError {}
