use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MAX_WAVELET_LEVELS;
use crate::error::{FreqError, Result};
use crate::filters::convolve::separable;
use crate::filters::kernel::dilated_b3_kernel;
use crate::image::validate_image;

use super::{Decomposition, MultiscaleTransform};

/// Undecimated ("à trous") wavelet transform with a dilated B3-spline kernel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtrousTransform {
    /// Number of detail layers to produce.
    pub levels: usize,
}

impl Default for AtrousTransform {
    fn default() -> Self {
        Self { levels: 6 }
    }
}

impl MultiscaleTransform for AtrousTransform {
    fn name(&self) -> &str {
        "a trous"
    }

    fn decompose(&self, data: &Array2<f32>) -> Result<Decomposition> {
        atrous_decompose(data, self.levels)
    }
}

/// Decompose an image into `levels` wavelet detail layers + residual.
///
/// At level `i` the current image is smoothed with the level-`i` dilated
/// kernel, `detail[i] = current - smooth`, and the next level works on
/// `smooth`. The original is recovered as `sum(details) + residual`.
pub fn atrous_decompose(data: &Array2<f32>, levels: usize) -> Result<Decomposition> {
    validate_image(data)?;
    check_levels(levels)?;
    let (layers, residual) = b3_decompose(data, levels);
    Decomposition::new(layers, residual)
}

/// Sum the residual and all detail layers.
pub fn atrous_reconstruct(decomposition: &Decomposition) -> Array2<f32> {
    decomposition.reconstruct()
}

/// Reject level counts whose dilated kernel would not fit in memory.
pub(crate) fn check_levels(levels: usize) -> Result<()> {
    if levels > MAX_WAVELET_LEVELS {
        return Err(FreqError::InvalidParameter(format!(
            "wavelet levels must be at most {MAX_WAVELET_LEVELS}, got {levels}"
        )));
    }
    Ok(())
}

/// Level loop shared by the à trous and stationary transforms.
pub(crate) fn b3_decompose(data: &Array2<f32>, levels: usize) -> (Vec<Array2<f32>>, Array2<f32>) {
    let mut layers = Vec::with_capacity(levels);
    let mut current = data.clone();

    for level in 0..levels {
        let kernel = dilated_b3_kernel(level);
        debug!(level, kernel_len = kernel.len(), "B3 wavelet level");
        let smoothed = separable(&current, &kernel, &kernel);
        layers.push(&current - &smoothed);
        current = smoothed;
    }

    (layers, current)
}
