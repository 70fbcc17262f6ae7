use hybrid_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// A scalar parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The kernel has no unique center pixel.
    #[error("Kernel dimensions must be odd, got {height}x{width}")]
    InvalidKernel {
        /// Height of the rejected kernel.
        height: usize,
        /// Width of the rejected kernel.
        width: usize,
    },

    /// The image is neither (H, W) nor (H, W, C).
    #[error("Image rank {0} is not supported, expected (H, W) or (H, W, C)")]
    UnsupportedDimensionality(usize),

    /// Two images that must be combined have different shapes.
    #[error("Image shape {0:?} does not match {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// The band selector is neither "low" nor "high".
    #[error("Invalid band selector {0:?}, expected \"low\" or \"high\"")]
    InvalidBand(String),

    /// Error raised while scheduling work on a thread pool.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// Error raised by the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
