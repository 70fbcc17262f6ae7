use crate::{Image, ImageDtype, ImageError};

/// Convert the samples of an image to normalized `f32` values in `[0.0, 1.0]`.
///
/// The samples are cast with [`Image::cast_and_scale`] using the
/// [`ImageDtype::NORMALIZATION_SCALE`] of the source type: `u8` samples are scaled
/// by `1 / 255`, `f32` samples are copied unchanged.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image with the same shape as `src`.
///
/// Example:
///
/// ```
/// use hybrid_image::Image;
/// use hybrid_image::ops::normalize_to_f32;
///
/// let image = Image::<u8>::new(&[1, 2], vec![0u8, 255]).unwrap();
/// let mut image_f32 = Image::from_shape_val(image.shape(), 0.0f32);
///
/// normalize_to_f32(&image, &mut image_f32).unwrap();
///
/// assert_eq!(image_f32.as_slice()[0], 0.0);
/// assert!((image_f32.as_slice()[1] - 1.0).abs() < 1e-6);
/// ```
pub fn normalize_to_f32<T: ImageDtype>(
    src: &Image<T>,
    dst: &mut Image<f32>,
) -> Result<(), ImageError> {
    if !src.same_shape(dst) {
        return Err(ImageError::InvalidImageShape(
            src.shape().to_vec(),
            dst.shape().to_vec(),
        ));
    }

    *dst = src.cast_and_scale(T::NORMALIZATION_SCALE)?;

    Ok(())
}

/// Scale `f32` samples and quantize them to `u8`.
///
/// Each sample is multiplied by `scale`, saturated to `[0, 255]` and truncated
/// toward zero. NaN samples become 0.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image with the same shape as `src`.
/// * `scale` - The scale to multiply the pixel data with before quantizing.
pub fn quantize_to_u8(
    src: &Image<f32>,
    dst: &mut Image<u8>,
    scale: f32,
) -> Result<(), ImageError> {
    if !src.same_shape(dst) {
        return Err(ImageError::InvalidImageShape(
            src.shape().to_vec(),
            dst.shape().to_vec(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| *out = u8::from_f32(inp * scale));

    Ok(())
}
