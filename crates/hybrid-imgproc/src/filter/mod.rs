//! Filter operations
//!
//! This module provides spatial filter operations for image processing: gaussian
//! kernel synthesis, zero padded cross-correlation and convolution, and the
//! gaussian low-pass and high-pass filters built on top of them.

/// Filter kernels
pub mod kernels;

/// Cross-correlation engine
mod correlation;
pub use correlation::*;

/// Convolution and band-pass filters
mod ops;
pub use ops::*;
