use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::image::{ensure_same_shape, validate_image};

use super::{Decomposition, MultiscaleTransform};

/// Single-scale split into a Gaussian low-pass and its high-pass remainder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LowHighSplit {
    pub sigma: f64,
}

impl MultiscaleTransform for LowHighSplit {
    fn name(&self) -> &str {
        "low/high split"
    }

    fn decompose(&self, data: &Array2<f32>) -> Result<Decomposition> {
        let (low, high) = split_low_high(data, self.sigma)?;
        Decomposition::new(vec![high], low)
    }
}

/// `low = blur(src, sigma)`, `high = src - low`.
pub fn split_low_high(data: &Array2<f32>, sigma: f64) -> Result<(Array2<f32>, Array2<f32>)> {
    validate_image(data)?;
    let low = gaussian_blur_array(data, sigma)?;
    let high = ndarray::Zip::from(data)
        .and(&low)
        .par_map_collect(|&src, &lo| src - lo);
    Ok((low, high))
}

/// Recombine a low/high pair by addition.
pub fn reconstruct_low_high(low: &Array2<f32>, high: &Array2<f32>) -> Result<Array2<f32>> {
    validate_image(low)?;
    ensure_same_shape(low, high)?;
    Ok(low + high)
}
