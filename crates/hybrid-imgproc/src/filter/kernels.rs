use crate::error::FilterError;

/// A 2D grid of filter weights stored in row-major order.
///
/// The kernel is not required to be symmetric or separable. Correlation and
/// convolution require both dimensions to be odd so that a unique center exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a new kernel from its dimensions and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameter`] if a dimension is zero or the number
    /// of weights does not match `height * width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    ///
    /// assert_eq!(kernel.get(0, 2), Some(3.0));
    /// assert_eq!(kernel.center(), (0, 1));
    /// ```
    pub fn new(height: usize, width: usize, data: Vec<f32>) -> Result<Self, FilterError> {
        if height == 0 || width == 0 {
            return Err(FilterError::InvalidParameter(format!(
                "kernel dimensions must be positive, got {height}x{width}"
            )));
        }

        if data.len() != height * width {
            return Err(FilterError::InvalidParameter(format!(
                "kernel of {height}x{width} expects {} weights, got {}",
                height * width,
                data.len()
            )));
        }

        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Create a kernel where every weight is one.
    pub fn ones(height: usize, width: usize) -> Result<Self, FilterError> {
        Self::new(height, width, vec![1.0; height * width])
    }

    /// Height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The (row, col) position of the center weight.
    pub fn center(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Whether both dimensions are odd.
    pub fn is_odd(&self) -> bool {
        self.height % 2 == 1 && self.width % 2 == 1
    }

    /// Get the weight at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Return the kernel rotated by 180 degrees.
    ///
    /// Reversing a row-major buffer reverses the row order and the column order.
    pub fn flipped(&self) -> Self {
        Self {
            height: self.height,
            width: self.width,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

/// Reverse both the row order and the column order of a kernel.
pub fn flip_both_axes(kernel: &Kernel) -> Kernel {
    kernel.flipped()
}

fn check_sigma(sigma: f32) -> Result<(), FilterError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "sigma must be positive and finite, got {sigma}"
        )));
    }
    Ok(())
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the normalized kernel weights.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, FilterError> {
    check_sigma(sigma)?;
    if kernel_size == 0 {
        return Err(FilterError::InvalidParameter(
            "kernel size must be positive".to_string(),
        ));
    }

    let mean = (kernel_size - 1) as f64 / 2.0;
    let sigma = sigma as f64;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    let kernel = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - mean;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    if !(norm.is_finite() && norm > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "sigma {sigma} is too small for a kernel of size {kernel_size}"
        )));
    }
    Ok(kernel.iter().map(|k| (k / norm) as f32).collect())
}

/// Create a 2D gaussian blur kernel.
///
/// Each weight is `exp(-(x² + y²) / (2σ²))` where `(x, y)` is the offset of the cell
/// from the geometric center `((width - 1) / 2, (height - 1) / 2)`. The weights are
/// normalized to sum to one so that blurring preserves the image brightness.
///
/// # Arguments
///
/// * `sigma` - The spread of the gaussian, must be positive.
/// * `height` - The height of the kernel.
/// * `width` - The width of the kernel.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameter`] if `sigma` is not positive and finite or
/// a dimension is zero.
///
/// # Examples
///
/// ```
/// use hybrid_imgproc::filter::kernels::gaussian_kernel_2d;
///
/// let kernel = gaussian_kernel_2d(1.0, 3, 5).unwrap();
///
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.width(), 5);
/// assert!((kernel.sum() - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_kernel_2d(sigma: f32, height: usize, width: usize) -> Result<Kernel, FilterError> {
    check_sigma(sigma)?;
    if height == 0 || width == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "kernel dimensions must be positive, got {height}x{width}"
        )));
    }

    // weights are accumulated in f64 so that the normalized kernel sums to one
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    let cy = (height - 1) as f64 / 2.0;
    let cx = (width - 1) as f64 / 2.0;

    let weights = (0..height)
        .flat_map(|i| {
            let y = i as f64 - cy;
            (0..width).map(move |j| {
                let x = j as f64 - cx;
                (-(x * x + y * y) / denom).exp()
            })
        })
        .collect::<Vec<_>>();

    let norm = weights.iter().sum::<f64>();
    if !(norm.is_finite() && norm > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "sigma {sigma} is too small for a kernel of {height}x{width}"
        )));
    }

    Kernel::new(
        height,
        width,
        weights.iter().map(|w| (w / norm) as f32).collect(),
    )
}
