use ndarray::{ArrayBase, Data, Ix2};

use crate::consts::MAD_GAUSSIAN_SCALE;

/// Exact median by in-place selection.
///
/// Takes ownership of `values` because selection reorders them. For an even
/// count the upper of the two middle values (index `n / 2`) is returned.
/// An empty input yields 0.
pub fn median(mut values: Vec<f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
}

/// Raw median absolute deviation, `median(|x - median(x)|)`.
pub fn mad<S>(data: &ArrayBase<S, Ix2>) -> f64
where
    S: Data<Elem = f32>,
{
    estimate_noise(data).mad
}

/// Robust noise level of a detail layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseEstimate {
    pub median: f64,
    pub mad: f64,
    /// Standard deviation of an assumed Gaussian noise process: `1.4826 * mad`.
    pub sigma: f64,
}

impl NoiseEstimate {
    /// Threshold for a given per-level strength multiplier.
    pub fn threshold(&self, strength: f32) -> f32 {
        (self.sigma * strength as f64) as f32
    }
}

pub fn estimate_noise<S>(layer: &ArrayBase<S, Ix2>) -> NoiseEstimate
where
    S: Data<Elem = f32>,
{
    let values: Vec<f64> = layer.iter().map(|&v| v as f64).collect();
    let med = median(values);
    let deviations: Vec<f64> = layer.iter().map(|&v| (v as f64 - med).abs()).collect();
    let mad = median(deviations);

    NoiseEstimate {
        median: med,
        mad,
        sigma: MAD_GAUSSIAN_SCALE * mad,
    }
}
