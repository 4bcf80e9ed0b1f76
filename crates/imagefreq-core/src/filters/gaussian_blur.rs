use ndarray::Array2;

use crate::error::Result;
use crate::image::validate_image;

use super::convolve::separable;
use super::kernel::gaussian_kernel;

/// Apply Gaussian blur using separable 1D convolution with a clamped edge.
pub fn gaussian_blur(data: &Array2<f32>, sigma: f64) -> Result<Array2<f32>> {
    validate_image(data)?;
    gaussian_blur_array(data, sigma)
}

/// Blur without re-validating the image shape. The sigma is still checked
/// because it determines the kernel.
pub(crate) fn gaussian_blur_array(data: &Array2<f32>, sigma: f64) -> Result<Array2<f32>> {
    let kernel = gaussian_kernel(sigma)?;
    Ok(separable(data, &kernel, &kernel))
}
