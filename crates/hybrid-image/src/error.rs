/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the product of the shape.
    #[error("Data length ({0}) does not match the image shape ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the image rank is not supported by the operation.
    #[error("Image rank {0} is not supported, expected (H, W) or (H, W, C)")]
    InvalidRank(usize),

    /// Error when two image shapes are expected to be equal.
    #[error("Image shape {0:?} does not match {1:?}")]
    InvalidImageShape(Vec<usize>, Vec<usize>),

    /// Error when a sample cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
