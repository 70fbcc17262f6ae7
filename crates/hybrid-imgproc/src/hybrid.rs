//! Hybrid image composition.
//!
//! A hybrid image blends the low frequency content of one image with the high
//! frequency content of another. Seen from afar the low frequencies dominate, up
//! close the fine details of the other image take over.
//!
//! # Example
//!
//! ```
//! use hybrid_image::Image;
//! use hybrid_imgproc::hybrid::{create_hybrid_from_config, HybridConfig};
//!
//! let near = Image::from_shape_val(&[16, 16, 3], 200u8);
//! let far = Image::from_shape_val(&[16, 16, 3], 50u8);
//!
//! let config = HybridConfig::default().with_mixin_ratio(0.3);
//! let hybrid = create_hybrid_from_config(&near, &far, &config).unwrap();
//!
//! assert_eq!(hybrid.shape(), &[16, 16, 3]);
//! ```

use hybrid_image::{ops, Image, ImageDtype};

pub use crate::filter::{Band, BandFilter};
use crate::error::FilterError;
use crate::parallel;

/// Parameters of a hybrid image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridConfig {
    /// Filter applied to the first image.
    pub first: BandFilter,
    /// Filter applied to the second image.
    pub second: BandFilter,
    /// Weight of the second image; the first image is weighted by `1 - mixin_ratio`.
    pub mixin_ratio: f32,
    /// Gain applied to the weighted sum before quantization.
    pub scale_factor: f32,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            first: BandFilter::new(Band::Low, 7.0, 29),
            second: BandFilter::new(Band::High, 7.0, 29),
            mixin_ratio: 0.5,
            scale_factor: 1.0,
        }
    }
}

impl HybridConfig {
    /// Set the filter applied to the first image.
    pub fn with_first(mut self, filter: BandFilter) -> Self {
        self.first = filter;
        self
    }

    /// Set the filter applied to the second image.
    pub fn with_second(mut self, filter: BandFilter) -> Self {
        self.second = filter;
        self
    }

    /// Set the weight of the second image.
    pub fn with_mixin_ratio(mut self, mixin_ratio: f32) -> Self {
        self.mixin_ratio = mixin_ratio;
        self
    }

    /// Set the gain applied before quantization.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

/// Create a hybrid image from two images.
///
/// `u8` inputs are normalized to `[0, 1]` first, `f32` inputs are assumed to be
/// normalized already. Each image is filtered with its own band, sigma and size,
/// the results are weighted by `1 - mixin_ratio` and `mixin_ratio`, summed, scaled
/// by `scale_factor` and finally quantized to `u8` with a single clip to `[0, 255]`.
///
/// # Arguments
///
/// * `img1` - The first image with shape (H, W) or (H, W, C).
/// * `img2` - The second image with the same shape as `img1`.
/// * `sigma1` - The sigma of the filter applied to `img1`.
/// * `size1` - The odd kernel size of the filter applied to `img1`.
/// * `band1` - The band kept from `img1`.
/// * `sigma2` - The sigma of the filter applied to `img2`.
/// * `size2` - The odd kernel size of the filter applied to `img2`.
/// * `band2` - The band kept from `img2`.
/// * `mixin_ratio` - The weight of `img2`, `img1` is weighted by `1 - mixin_ratio`.
/// * `scale_factor` - The gain applied to the weighted sum.
///
/// # Errors
///
/// * [`FilterError::ShapeMismatch`] if the images differ in shape.
/// * Any error of the underlying filters.
#[allow(clippy::too_many_arguments)]
pub fn create_hybrid<T: ImageDtype>(
    img1: &Image<T>,
    img2: &Image<T>,
    sigma1: f32,
    size1: usize,
    band1: Band,
    sigma2: f32,
    size2: usize,
    band2: Band,
    mixin_ratio: f32,
    scale_factor: f32,
) -> Result<Image<u8>, FilterError> {
    let config = HybridConfig {
        first: BandFilter::new(band1, sigma1, size1),
        second: BandFilter::new(band2, sigma2, size2),
        mixin_ratio,
        scale_factor,
    };
    create_hybrid_from_config(img1, img2, &config)
}

/// Create a hybrid image from two images and a [`HybridConfig`].
///
/// See [`create_hybrid`] for the composition steps.
pub fn create_hybrid_from_config<T: ImageDtype>(
    img1: &Image<T>,
    img2: &Image<T>,
    config: &HybridConfig,
) -> Result<Image<u8>, FilterError> {
    if !img1.same_shape(img2) {
        return Err(FilterError::ShapeMismatch(
            img1.shape().to_vec(),
            img2.shape().to_vec(),
        ));
    }

    if !(2..=3).contains(&img1.ndim()) {
        return Err(FilterError::UnsupportedDimensionality(img1.ndim()));
    }

    log::debug!(
        "create_hybrid: shape={:?} first={:?} second={:?} mixin_ratio={} scale_factor={}",
        img1.shape(),
        config.first,
        config.second,
        config.mixin_ratio,
        config.scale_factor
    );

    let mut src1 = Image::from_shape_val(img1.shape(), 0.0f32);
    ops::normalize_to_f32(img1, &mut src1)?;
    let mut src2 = Image::from_shape_val(img2.shape(), 0.0f32);
    ops::normalize_to_f32(img2, &mut src2)?;

    let filtered1 = config.first.apply(&src1)?;
    let filtered2 = config.second.apply(&src2)?;

    let weight1 = 1.0 - config.mixin_ratio;
    let weight2 = config.mixin_ratio;
    let scale_factor = config.scale_factor;

    // intermediate values stay unclipped, only the quantization saturates
    let mut blended = Image::from_shape_val(img1.shape(), 0.0f32);
    parallel::par_iter_rows_val_two(&filtered1, &filtered2, &mut blended, |&a, &b, out| {
        *out = (a * weight1 + b * weight2) * scale_factor;
    });

    let mut dst = Image::from_shape_val(img1.shape(), 0u8);
    ops::quantize_to_u8(&blended, &mut dst, 255.0)?;

    Ok(dst)
}
