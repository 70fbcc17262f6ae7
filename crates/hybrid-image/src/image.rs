use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use hybrid_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for the sample types accepted at the image boundary.
///
/// Integer samples live in `[0, 255]`, floating point samples are expected to be
/// already normalized to `[0.0, 1.0]`.
pub trait ImageDtype: Copy + Default + Send + Sync + num_traits::NumCast + 'static {
    /// Scale that maps the sample range onto `[0.0, 1.0]` once cast to `f32`.
    const NORMALIZATION_SCALE: f32;

    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    const NORMALIZATION_SCALE: f32 = 1.0;

    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    const NORMALIZATION_SCALE: f32 = 1.0 / 255.0;

    // NOTE: truncates toward zero after saturating, NaN maps to 0
    fn from_f32(x: f32) -> Self {
        x.clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored contiguously in row-major order. A grayscale image has
/// shape `(H, W)` and a multi-channel image has shape `(H, W, C)` with interleaved
/// channels. Other ranks can be constructed, but filters reject them.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from a shape and pixel data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the image, `[H, W]` or `[H, W, C]`.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the shape, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_image::Image;
    ///
    /// let image = Image::<u8>::new(&[20, 10, 3], vec![0u8; 10 * 20 * 3]).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(shape: &[usize], data: Vec<T>) -> Result<Self, ImageError> {
        let numel = shape.iter().product::<usize>();
        if data.len() != numel {
            return Err(ImageError::InvalidChannelShape(data.len(), numel));
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Create a new single channel image of shape `(H, W)`.
    pub fn gray(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        Self::new(&[size.height, size.width], data)
    }

    /// Create a new multi-channel image of shape `(H, W, C)`.
    pub fn color(size: ImageSize, channels: usize, data: Vec<T>) -> Result<Self, ImageError> {
        Self::new(&[size.height, size.width, channels], data)
    }

    /// Create a new image with the given shape filled with `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_image::Image;
    ///
    /// let image = Image::<f32>::from_shape_val(&[4, 5], 0.5);
    ///
    /// assert_eq!(image.ndim(), 2);
    /// assert_eq!(image.as_slice().len(), 20);
    /// ```
    pub fn from_shape_val(shape: &[usize], val: T) -> Self
    where
        T: Clone,
    {
        Self {
            shape: shape.to_vec(),
            data: vec![val; shape.iter().product()],
        }
    }

    /// The shape of the image.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The number of dimensions of the image.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(0)
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the number of samples stored per pixel; 1 for grayscale images.
    pub fn num_channels(&self) -> usize {
        self.shape.iter().skip(2).product()
    }

    /// Whether both images have exactly the same shape.
    pub fn same_shape<U>(&self, other: &Image<U>) -> bool {
        self.shape == other.shape
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a sample by its multi-dimensional index.
    ///
    /// Returns `None` if the index rank or any coordinate is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset)
    }

    /// Apply a function to every sample and return a new image of the same shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Cast the pixel data to a different type and scale it.
    ///
    /// # Arguments
    ///
    /// * `scale` - The scale to multiply the pixel data with.
    ///
    /// # Errors
    ///
    /// If the pixel data cannot be cast to the new type, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_image::Image;
    ///
    /// let image_u8 = Image::<u8>::new(&[2, 1, 3], vec![0u8, 0, 255, 0, 0, 255]).unwrap();
    ///
    /// let image_f32 = image_u8.cast_and_scale::<f32>(1. / 255.0).unwrap();
    ///
    /// let value = image_f32.get(&[1, 0, 2]).copied().unwrap_or_default();
    /// assert!((value - 1.0).abs() < 1e-6);
    /// ```
    pub fn cast_and_scale<U>(&self, scale: U) -> Result<Image<U>, ImageError>
    where
        U: num_traits::NumCast + std::ops::Mul<Output = U> + Copy,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| {
                let xu = U::from(x)
                    .ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().to_string()))?;
                Ok(xu * scale)
            })
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(&self.shape, casted_data)
    }

    /// Get a channel of the image as a `(H, W)` image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds or the image is neither `(H, W)` nor
    /// `(H, W, C)`, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T>, ImageError>
    where
        T: Clone,
    {
        if !(2..=3).contains(&self.ndim()) {
            return Err(ImageError::InvalidRank(self.ndim()));
        }

        let channels = self.num_channels();
        if channel >= channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, channels));
        }

        let channel_data = self
            .data
            .iter()
            .skip(channel)
            .step_by(channels)
            .cloned()
            .collect();

        Image::new(&[self.height(), self.width()], channel_data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageDtype, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8>::color(
            ImageSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.ndim(), 3);

        Ok(())
    }

    #[test]
    fn image_gray() -> Result<(), ImageError> {
        let image = Image::<f32>::gray(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0; 6],
        )?;
        assert_eq!(image.shape(), &[3, 2]);
        assert_eq!(image.num_channels(), 1);
        assert_eq!(image.rows(), 3);
        assert_eq!(image.cols(), 2);

        Ok(())
    }

    #[test]
    fn image_invalid_data_length() {
        let res = Image::<u8>::new(&[2, 2, 3], vec![0u8; 11]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = Image::new(&[2, 3], (0..6).collect::<Vec<u8>>())?;
        assert_eq!(image.get(&[1, 2]), Some(&5));
        assert_eq!(image.get(&[0, 1]), Some(&1));
        assert_eq!(image.get(&[2, 0]), None);
        assert_eq!(image.get(&[0, 0, 0]), None);

        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::new(&[2, 1, 3], vec![0u8, 1, 2, 3, 4, 5])?;
        assert_eq!(image_u8.get(&[1, 0, 2]), Some(&5u8));

        let image_f32 = image_u8.cast_and_scale(2.0f32)?;
        assert_eq!(image_f32.get(&[1, 0, 2]), Some(&10.0f32));
        assert_eq!(image_f32.shape(), image_u8.shape());

        let negative = Image::new(&[1, 1], vec![-1.0f32])?;
        assert!(matches!(
            negative.cast_and_scale(1u8),
            Err(ImageError::CastError(_))
        ));

        Ok(())
    }

    #[test]
    fn image_channel() -> Result<(), ImageError> {
        let image = Image::new(&[2, 1, 3], vec![0f32, 1., 2., 3., 4., 5.])?;

        let channel = image.channel(2)?;
        assert_eq!(channel.shape(), &[2, 1]);
        assert_eq!(channel.as_slice(), &[2.0, 5.0]);

        assert_eq!(
            image.channel(3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );

        let volume = Image::from_shape_val(&[1, 1, 1, 1], 0.0f32);
        assert_eq!(volume.channel(0), Err(ImageError::InvalidRank(4)));

        Ok(())
    }

    #[test]
    fn image_map() -> Result<(), ImageError> {
        let image = Image::new(&[1, 3], vec![1u8, 2, 3])?;
        let doubled = image.map(|&x| x as f32 * 2.0);
        assert_eq!(doubled.shape(), &[1, 3]);
        assert_eq!(doubled.as_slice(), &[2.0, 4.0, 6.0]);

        Ok(())
    }

    #[test]
    fn dtype_normalization() {
        assert_eq!(<f32 as ImageDtype>::NORMALIZATION_SCALE, 1.0);
        assert!((255.0 * <u8 as ImageDtype>::NORMALIZATION_SCALE - 1.0).abs() < 1e-6);

        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(-4.0), 0);
        assert_eq!(u8::from_f32(127.9), 127);
        assert_eq!(u8::from_f32(f32::NAN), 0);
    }
}
