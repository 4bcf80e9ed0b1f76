use ndarray::ArrayViewMut2;
use serde::{Deserialize, Serialize};

/// Shrinkage non-linearity applied to wavelet coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdMode {
    /// Zero below the threshold, and pull survivors toward zero by the threshold.
    #[default]
    Soft,
    /// Zero below the threshold, keep survivors unchanged.
    Hard,
}

impl std::fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soft => write!(f, "Soft"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Threshold a single coefficient.
///
/// `|v| < t` maps to 0. Otherwise hard mode keeps `v` and soft mode returns
/// `v - sign(v) * t`. A non-positive threshold leaves the value unchanged.
pub fn shrink(value: f32, threshold: f32, mode: ThresholdMode) -> f32 {
    if threshold <= 0.0 {
        return value;
    }
    let magnitude = value.abs();
    if magnitude < threshold {
        return 0.0;
    }
    match mode {
        ThresholdMode::Soft => (magnitude - threshold).copysign(value),
        ThresholdMode::Hard => value,
    }
}

/// Threshold every coefficient of a layer in place.
pub fn shrink_layer(mut layer: ArrayViewMut2<'_, f32>, threshold: f32, mode: ThresholdMode) {
    if threshold <= 0.0 {
        return;
    }
    layer.mapv_inplace(|v| shrink(v, threshold, mode));
}
