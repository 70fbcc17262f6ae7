#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for filtering operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// hybrid image composition module.
pub mod hybrid;

/// module containing parallization utilities.
pub mod parallel;

pub use crate::error::FilterError;
