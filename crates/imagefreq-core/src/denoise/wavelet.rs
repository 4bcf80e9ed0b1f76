use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::transform::atrous::atrous_decompose;
use crate::transform::swt::{swt_decompose, SwtDecomposition};
use crate::transform::Decomposition;

use super::stats::{estimate_noise, NoiseEstimate};
use super::threshold::{shrink_layer, ThresholdMode};

/// Parameters for MAD-adaptive à trous denoising.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaveletDenoiseParams {
    pub levels: usize,
    /// Threshold multiplier per level, finest first, in units of the
    /// layer's estimated noise sigma. Levels without an entry are untouched.
    pub strength: Vec<f32>,
    #[serde(default)]
    pub mode: ThresholdMode,
}

impl Default for WaveletDenoiseParams {
    fn default() -> Self {
        Self {
            levels: 4,
            strength: vec![3.0, 2.0, 1.0, 0.5],
            mode: ThresholdMode::Soft,
        }
    }
}

/// MAD-adaptive policy over any decomposition.
///
/// For each level with a positive strength, estimate the layer's noise via
/// MAD, scale by `strength[i]`, and threshold the layer. Returns the noise
/// estimate of every level that was processed.
pub fn mad_threshold_layers(
    decomposition: &mut Decomposition,
    strength: &[f32],
    mode: ThresholdMode,
) -> Vec<Option<NoiseEstimate>> {
    let mut estimates = vec![None; decomposition.levels()];

    decomposition.for_each_layer_mut(|level, layer| {
        let Some(&s) = strength.get(level) else {
            return;
        };
        if s <= 0.0 {
            return;
        }
        let noise = estimate_noise(&layer);
        let threshold = noise.threshold(s);
        debug!(level, sigma = noise.sigma, threshold, "MAD threshold");
        shrink_layer(layer, threshold, mode);
        estimates[level] = Some(noise);
    });

    estimates
}

/// À trous decomposition, MAD-adaptive thresholding, reconstruction.
pub fn wavelet_denoise(data: &Array2<f32>, params: &WaveletDenoiseParams) -> Result<Array2<f32>> {
    let mut decomposition = atrous_decompose(data, params.levels)?;
    let estimates = mad_threshold_layers(&mut decomposition, &params.strength, params.mode);
    info!(
        levels = params.levels,
        thresholded = estimates.iter().filter(|e| e.is_some()).count(),
        "Wavelet denoise complete"
    );
    Ok(decomposition.reconstruct())
}

/// Threshold an SWT decomposition in place, recording each layer's noise
/// sigma in its slot. `sigmas[i] <= 0` leaves layer `i` untouched.
pub fn swt_threshold(decomposition: &mut SwtDecomposition, sigmas: &[f32], mode: ThresholdMode) {
    for level in 0..decomposition.levels() {
        let multiplier = sigmas.get(level).copied().unwrap_or(0.0);
        if multiplier <= 0.0 {
            continue;
        }
        let Some(layer) = decomposition.detail_mut(level) else {
            continue;
        };
        let noise = estimate_noise(&layer);
        let threshold = noise.threshold(multiplier);
        debug!(level, sigma = noise.sigma, threshold, "SWT threshold");
        shrink_layer(layer, threshold, mode);
        decomposition.set_sigma(level, noise.sigma as f32);
    }
}

/// SWT with one level per entry of `sigmas`, MAD thresholding, reconstruction.
pub fn swt_denoise(data: &Array2<f32>, sigmas: &[f32], mode: ThresholdMode) -> Result<Array2<f32>> {
    let mut decomposition = swt_decompose(data, sigmas.len())?;
    swt_threshold(&mut decomposition, sigmas, mode);
    info!(levels = sigmas.len(), %mode, "SWT denoise complete");
    Ok(decomposition.reconstruct())
}
