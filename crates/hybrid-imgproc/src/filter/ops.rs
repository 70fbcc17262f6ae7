use std::{fmt, str::FromStr};

use hybrid_image::Image;

use super::correlation::cross_correlate_with;
use super::kernels::{self, Kernel};
use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};

/// Convolve an image with a kernel.
///
/// Equivalent to cross-correlating with the kernel rotated by 180 degrees.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W) or (H, W, C).
/// * `kernel` - The kernel with odd height and width.
pub fn convolve(src: &Image<f32>, kernel: &Kernel) -> Result<Image<f32>, FilterError> {
    convolve_with(src, kernel, ExecutionStrategy::default())
}

/// Convolve an image with a kernel using the given execution strategy.
pub fn convolve_with(
    src: &Image<f32>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Image<f32>, FilterError> {
    cross_correlate_with(src, &kernels::flip_both_axes(kernel), strategy)
}

fn square_gaussian(sigma: f32, size: usize) -> Result<Kernel, FilterError> {
    if size == 0 {
        return Err(FilterError::InvalidParameter(
            "filter size must be positive".to_string(),
        ));
    }
    if size % 2 == 0 {
        return Err(FilterError::InvalidKernel {
            height: size,
            width: size,
        });
    }
    kernels::gaussian_kernel_2d(sigma, size, size)
}

/// Smooth an image with a `size x size` gaussian kernel.
///
/// Suppresses the high frequency components (fine details) of the image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W) or (H, W, C).
/// * `sigma` - The sigma of the gaussian kernel.
/// * `size` - The odd size of the square kernel.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] for a non-positive sigma or a zero size
/// and [`FilterError::InvalidKernel`] for an even size.
pub fn low_pass(src: &Image<f32>, sigma: f32, size: usize) -> Result<Image<f32>, FilterError> {
    let kernel = square_gaussian(sigma, size)?;
    convolve(src, &kernel)
}

/// Keep the high frequency components of an image.
///
/// Computed as `src - low_pass(src)`. The result may be negative and is not clipped.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W) or (H, W, C).
/// * `sigma` - The sigma of the gaussian kernel.
/// * `size` - The odd size of the square kernel.
pub fn high_pass(src: &Image<f32>, sigma: f32, size: usize) -> Result<Image<f32>, FilterError> {
    let low = low_pass(src, sigma, size)?;

    let mut dst = Image::from_shape_val(src.shape(), 0.0f32);
    parallel::par_iter_rows_val_two(src, &low, &mut dst, |&orig, &smooth, out| {
        *out = orig - smooth;
    });

    Ok(dst)
}

/// The frequency band kept by a [`BandFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Keep the coarse content, see [`low_pass`].
    Low,
    /// Keep the fine details, see [`high_pass`].
    High,
}

impl FromStr for Band {
    type Err = FilterError;

    /// Parse a band selector, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Band::Low),
            "high" => Ok(Band::High),
            _ => Err(FilterError::InvalidBand(s.to_string())),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Band::Low => write!(f, "low"),
            Band::High => write!(f, "high"),
        }
    }
}

/// A gaussian band-pass filter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandFilter {
    /// The band to keep.
    pub band: Band,
    /// The sigma of the gaussian kernel.
    pub sigma: f32,
    /// The odd size of the square kernel.
    pub size: usize,
}

impl BandFilter {
    /// Create a new band filter.
    pub fn new(band: Band, sigma: f32, size: usize) -> Self {
        Self { band, sigma, size }
    }

    /// Apply the filter to an image.
    pub fn apply(&self, src: &Image<f32>) -> Result<Image<f32>, FilterError> {
        match self.band {
            Band::Low => low_pass(src, self.sigma, self.size),
            Band::High => high_pass(src, self.sigma, self.size),
        }
    }
}
