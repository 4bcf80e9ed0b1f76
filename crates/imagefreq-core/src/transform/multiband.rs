use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_MULTIBAND_SIGMA;
use crate::error::Result;
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::image::validate_image;

use super::{Decomposition, MultiscaleTransform};

/// Dyadic Gaussian band decomposition: no dilation and no downsampling, the
/// blur sigma doubles at every level instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultibandPyramid {
    pub levels: usize,
    /// Blur sigma of the finest band; level `i` uses `sigma0 * 2^i`.
    #[serde(default = "default_sigma0")]
    pub sigma0: f64,
}

fn default_sigma0() -> f64 {
    DEFAULT_MULTIBAND_SIGMA
}

impl MultiscaleTransform for MultibandPyramid {
    fn name(&self) -> &str {
        "multiband"
    }

    fn decompose(&self, data: &Array2<f32>) -> Result<Decomposition> {
        multiband_decompose(data, self.levels, self.sigma0)
    }
}

pub fn multiband_decompose(data: &Array2<f32>, levels: usize, sigma0: f64) -> Result<Decomposition> {
    validate_image(data)?;

    let mut bands = Vec::with_capacity(levels);
    let mut current = data.clone();

    for level in 0..levels {
        let sigma = sigma0 * 2f64.powi(level as i32);
        debug!(level, sigma, "Multiband level");
        let low = gaussian_blur_array(&current, sigma)?;
        bands.push(&current - &low);
        current = low;
    }

    Decomposition::new(bands, current)
}

pub fn multiband_reconstruct(decomposition: &Decomposition) -> Array2<f32> {
    decomposition.reconstruct()
}
