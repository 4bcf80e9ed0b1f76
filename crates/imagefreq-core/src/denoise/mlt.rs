use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::transform::atrous::atrous_decompose;
use crate::transform::Decomposition;

use super::threshold::{shrink_layer, ThresholdMode};

/// Fixed per-level thresholds, no noise estimation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MltDenoiseParams {
    pub levels: usize,
    /// Threshold per level, finest first. Levels past the end reuse the last
    /// entry; a value `<= 0` disables thresholding for that level.
    pub thresholds: Vec<f32>,
    #[serde(default)]
    pub mode: ThresholdMode,
}

impl Default for MltDenoiseParams {
    fn default() -> Self {
        Self {
            levels: 4,
            thresholds: vec![0.015, 0.010, 0.005, 0.0],
            mode: ThresholdMode::Soft,
        }
    }
}

impl MltDenoiseParams {
    pub fn threshold_for_level(&self, level: usize) -> Option<f32> {
        self.thresholds
            .get(level)
            .or_else(|| self.thresholds.last())
            .copied()
    }
}

/// Per-level affine adjustment of detail layers: `bias + gain * value`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MltParams {
    /// One gain per level; its length sets the number of levels.
    pub gain: Vec<f64>,
    /// Per-level bias; missing entries are zero. Negative values suppress noise.
    #[serde(default)]
    pub bias: Vec<f64>,
}

impl Default for MltParams {
    fn default() -> Self {
        Self {
            gain: vec![1.0; 4],
            bias: vec![0.0; 4],
        }
    }
}

/// Soft/hard threshold each layer at its fixed level threshold.
pub fn apply_fixed_thresholds(decomposition: &mut Decomposition, params: &MltDenoiseParams) {
    decomposition.for_each_layer_mut(|level, layer| {
        let Some(threshold) = params.threshold_for_level(level) else {
            return;
        };
        if threshold <= 0.0 {
            return;
        }
        debug!(level, threshold, "MLT threshold");
        shrink_layer(layer, threshold, params.mode);
    });
}

/// Replace every detail coefficient `v` of level `i` by `bias[i] + gain[i] * v`.
/// Levels beyond `gain` are left alone.
pub fn apply_gain_bias(decomposition: &mut Decomposition, params: &MltParams) {
    decomposition.for_each_layer_mut(|level, mut layer| {
        let Some(&gain) = params.gain.get(level) else {
            return;
        };
        let bias = params.bias.get(level).copied().unwrap_or(0.0);
        layer.mapv_inplace(|v| (bias + gain * v as f64) as f32);
    });
}

/// À trous decomposition, fixed per-level thresholds, reconstruction.
pub fn mlt_denoise(data: &Array2<f32>, params: &MltDenoiseParams) -> Result<Array2<f32>> {
    let mut decomposition = atrous_decompose(data, params.levels)?;
    apply_fixed_thresholds(&mut decomposition, params);
    info!(levels = params.levels, mode = %params.mode, "MLT denoise complete");
    Ok(decomposition.reconstruct())
}

/// À trous decomposition with one level per gain, affine layer adjustment,
/// reconstruction.
pub fn apply_mlt(data: &Array2<f32>, params: &MltParams) -> Result<Array2<f32>> {
    let mut decomposition = atrous_decompose(data, params.gain.len())?;
    apply_gain_bias(&mut decomposition, params);
    info!(levels = params.gain.len(), "MLT gain/bias applied");
    Ok(decomposition.reconstruct())
}
