use hybrid_image::Image;

use super::kernels::Kernel;
use crate::error::FilterError;
use crate::parallel::{self, ExecutionStrategy};

/// Compute the 2D cross-correlation of an image with a kernel.
///
/// Samples outside the image are treated as zero and the output has exactly the
/// shape of the input. For `(H, W, C)` images the same kernel is applied to every
/// channel independently.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W) or (H, W, C).
/// * `kernel` - The kernel with odd height and width.
///
/// # Errors
///
/// * [`FilterError::UnsupportedDimensionality`] if the image rank is not 2 or 3.
/// * [`FilterError::InvalidKernel`] if a kernel dimension is even.
///
/// # Examples
///
/// ```
/// use hybrid_image::Image;
/// use hybrid_imgproc::filter::{cross_correlate, kernels::Kernel};
///
/// let image = Image::from_shape_val(&[3, 3], 1.0f32);
/// let kernel = Kernel::ones(3, 3).unwrap();
///
/// let out = cross_correlate(&image, &kernel).unwrap();
///
/// assert_eq!(out.as_slice(), &[4.0, 6.0, 4.0, 6.0, 9.0, 6.0, 4.0, 6.0, 4.0]);
/// ```
pub fn cross_correlate(src: &Image<f32>, kernel: &Kernel) -> Result<Image<f32>, FilterError> {
    cross_correlate_with(src, kernel, ExecutionStrategy::default())
}

/// Compute the 2D cross-correlation of an image with a kernel using the given
/// execution strategy.
///
/// The result does not depend on the strategy: every output sample is accumulated
/// by the same sequential loop, rows are only distributed across threads.
pub fn cross_correlate_with(
    src: &Image<f32>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Image<f32>, FilterError> {
    if !(2..=3).contains(&src.ndim()) {
        return Err(FilterError::UnsupportedDimensionality(src.ndim()));
    }

    if !kernel.is_odd() {
        return Err(FilterError::InvalidKernel {
            height: kernel.height(),
            width: kernel.width(),
        });
    }

    log::debug!(
        "cross_correlate: shape={:?} kernel={}x{} strategy={:?}",
        src.shape(),
        kernel.height(),
        kernel.width(),
        strategy
    );

    let mut dst = Image::from_shape_val(src.shape(), 0.0f32);

    let geometry = Geometry {
        rows: src.rows(),
        cols: src.cols(),
        channels: src.num_channels(),
    };
    let src_data = src.as_slice();

    parallel::for_each_row(
        strategy,
        dst.as_slice_mut(),
        geometry.cols * geometry.channels,
        |r, dst_row| correlate_row(src_data, &geometry, kernel, r, dst_row),
    )?;

    Ok(dst)
}

struct Geometry {
    rows: usize,
    cols: usize,
    channels: usize,
}

/// Compute one output row.
///
/// The kernel window is clipped against the image bounds instead of reading from a
/// padded copy, so taps that fall outside the image contribute nothing.
fn correlate_row(src: &[f32], g: &Geometry, kernel: &Kernel, r: usize, dst_row: &mut [f32]) {
    let (kh, kw) = (kernel.height(), kernel.width());
    let (pad_h, pad_w) = kernel.center();
    let weights = kernel.as_slice();

    // kernel rows that land inside the image for this output row
    let ky_start = pad_h.saturating_sub(r);
    let ky_end = kh.min(g.rows + pad_h - r);

    for (col, dst_px) in dst_row.chunks_exact_mut(g.channels).enumerate() {
        let kx_start = pad_w.saturating_sub(col);
        let kx_end = kw.min(g.cols + pad_w - col);

        for ky in ky_start..ky_end {
            let src_row = (r + ky - pad_h) * g.cols;
            let k_row = &weights[ky * kw..(ky + 1) * kw];

            for (kx, &w) in k_row.iter().enumerate().take(kx_end).skip(kx_start) {
                let offset = (src_row + col + kx - pad_w) * g.channels;
                let src_px = &src[offset..offset + g.channels];
                dst_px
                    .iter_mut()
                    .zip(src_px.iter())
                    .for_each(|(acc, &v)| *acc += v * w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ones_kernel_on_ones_image() -> Result<(), FilterError> {
        let image = Image::from_shape_val(&[5, 5], 1.0f32);
        let kernel = Kernel::ones(3, 3)?;

        let out = cross_correlate(&image, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            out.as_slice(),
            &[
                4.0, 6.0, 6.0, 6.0, 4.0,
                6.0, 9.0, 9.0, 9.0, 6.0,
                6.0, 9.0, 9.0, 9.0, 6.0,
                6.0, 9.0, 9.0, 9.0, 6.0,
                4.0, 6.0, 6.0, 6.0, 4.0,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_no_kernel_reversal() -> Result<(), FilterError> {
        // an impulse picks up the kernel rotated by 180 degrees
        #[rustfmt::skip]
        let image = Image::new(&[3, 3], vec![
            0.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 0.0,
        ])?;
        #[rustfmt::skip]
        let kernel = Kernel::new(3, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ])?;

        let out = cross_correlate(&image, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            out.as_slice(),
            &[
                9.0, 8.0, 7.0,
                6.0, 5.0, 4.0,
                3.0, 2.0, 1.0,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_rectangular_kernel() -> Result<(), FilterError> {
        let image = Image::new(&[2, 4], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])?;
        let kernel = Kernel::new(1, 3, vec![1.0, 0.0, -1.0])?;

        let out = cross_correlate(&image, &kernel)?;

        assert_eq!(out.as_slice(), &[-2.0, -2.0, -2.0, 3.0, -6.0, -2.0, -2.0, 7.0]);

        Ok(())
    }

    #[test]
    fn test_channels_are_independent() -> Result<(), FilterError> {
        // channel 0 is ones, channel 1 is zeros, channel 2 is twos
        let data = (0..9).flat_map(|_| [1.0f32, 0.0, 2.0]).collect();
        let image = Image::new(&[3, 3, 3], data)?;
        let kernel = Kernel::ones(3, 3)?;

        let out = cross_correlate(&image, &kernel)?;

        assert_eq!(out.shape(), &[3, 3, 3]);
        let ch0 = out.channel(0)?;
        let ch1 = out.channel(1)?;
        let ch2 = out.channel(2)?;
        assert_eq!(ch0.as_slice(), &[4.0, 6.0, 4.0, 6.0, 9.0, 6.0, 4.0, 6.0, 4.0]);
        assert!(ch1.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(ch2.as_slice(), &[8.0, 12.0, 8.0, 12.0, 18.0, 12.0, 8.0, 12.0, 8.0]);

        Ok(())
    }

    #[test]
    fn test_kernel_larger_than_image() -> Result<(), FilterError> {
        let image = Image::new(&[2, 2], vec![1.0f32, 2.0, 3.0, 4.0])?;
        let kernel = Kernel::ones(5, 7)?;

        let out = cross_correlate(&image, &kernel)?;

        assert_eq!(out.as_slice(), &[10.0, 10.0, 10.0, 10.0]);

        Ok(())
    }

    #[test]
    fn test_strategies_agree() -> Result<(), FilterError> {
        let data = (0..6 * 7 * 3).map(|x| (x % 11) as f32 * 0.1).collect();
        let image = Image::new(&[6, 7, 3], data)?;
        let kernel = Kernel::new(3, 5, (0..15).map(|x| x as f32 - 7.0).collect())?;

        let serial = cross_correlate_with(&image, &kernel, ExecutionStrategy::Serial)?;
        let rows = cross_correlate_with(&image, &kernel, ExecutionStrategy::ParallelRows)?;
        let fixed = cross_correlate_with(&image, &kernel, ExecutionStrategy::Fixed(3))?;

        assert_eq!(serial, rows);
        assert_eq!(serial, fixed);

        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), FilterError> {
        let image = Image::from_shape_val(&[0, 4], 0.0f32);
        let out = cross_correlate(&image, &Kernel::ones(3, 3)?)?;
        assert_eq!(out.shape(), &[0, 4]);
        Ok(())
    }

    #[test]
    fn test_even_kernel_rejected() -> Result<(), FilterError> {
        let image = Image::from_shape_val(&[4, 4], 1.0f32);

        assert_eq!(
            cross_correlate(&image, &Kernel::ones(2, 3)?),
            Err(FilterError::InvalidKernel {
                height: 2,
                width: 3
            })
        );
        assert_eq!(
            cross_correlate(&image, &Kernel::ones(3, 4)?),
            Err(FilterError::InvalidKernel {
                height: 3,
                width: 4
            })
        );

        Ok(())
    }

    #[test]
    fn test_unsupported_rank() -> Result<(), FilterError> {
        let kernel = Kernel::ones(3, 3)?;

        let flat = Image::from_shape_val(&[9], 1.0f32);
        assert_eq!(
            cross_correlate(&flat, &kernel),
            Err(FilterError::UnsupportedDimensionality(1))
        );

        let volume = Image::from_shape_val(&[2, 2, 2, 2], 1.0f32);
        assert_eq!(
            cross_correlate(&volume, &kernel),
            Err(FilterError::UnsupportedDimensionality(4))
        );

        Ok(())
    }
}
