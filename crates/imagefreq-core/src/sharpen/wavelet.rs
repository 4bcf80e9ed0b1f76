use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::denoise::threshold::{shrink_layer, ThresholdMode};
use crate::error::Result;
use crate::transform::atrous::atrous_decompose;

/// Parameters for wavelet sharpening.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaveletSharpenParams {
    /// Number of wavelet decomposition layers (typically 6).
    pub num_layers: usize,
    /// Coefficient per layer: >1.0 sharpens, <1.0 suppresses, 1.0 unchanged.
    pub coefficients: Vec<f32>,
    /// Per-layer soft threshold applied before weighting. 0.0 = no denoise.
    #[serde(default)]
    pub denoise: Vec<f32>,
}

impl Default for WaveletSharpenParams {
    fn default() -> Self {
        Self {
            num_layers: 6,
            coefficients: vec![1.5, 1.3, 1.2, 1.1, 1.0, 1.0],
            denoise: vec![],
        }
    }
}

/// Sharpen an image by re-weighting its à trous detail layers.
pub fn sharpen(data: &Array2<f32>, params: &WaveletSharpenParams) -> Result<Array2<f32>> {
    let mut decomposition = atrous_decompose(data, params.num_layers)?;

    decomposition.for_each_layer_mut(|level, layer| {
        let threshold = params.denoise.get(level).copied().unwrap_or(0.0);
        shrink_layer(layer, threshold, ThresholdMode::Soft);
    });

    Ok(decomposition.reconstruct_weighted(&params.coefficients))
}
