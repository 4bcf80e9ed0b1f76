use ndarray::{Array2, Zip};

use crate::error::{FreqError, Result};
use crate::image::{ensure_same_shape, validate_image, Channels};

/// Largest absolute per-pixel difference between two images of equal shape.
pub fn max_abs_error(a: &Array2<f32>, b: &Array2<f32>) -> Result<f32> {
    validate_image(a)?;
    ensure_same_shape(a, b)?;
    Ok(Zip::from(a)
        .and(b)
        .fold(0.0f32, |acc, &x, &y| acc.max((x - y).abs())))
}

/// Per-pixel `a - b`.
pub fn diff_image(a: &Array2<f32>, b: &Array2<f32>) -> Result<Array2<f32>> {
    validate_image(a)?;
    ensure_same_shape(a, b)?;
    Ok(a - b)
}

/// [`max_abs_error`] per channel, in channel order.
pub fn max_abs_error_channels(a: &Channels, b: &Channels) -> Result<Vec<f32>> {
    check_channel_count(a, b)?;
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| max_abs_error(x, y))
        .collect()
}

/// [`diff_image`] per channel.
pub fn diff_channels(a: &Channels, b: &Channels) -> Result<Channels> {
    check_channel_count(a, b)?;
    let diffs = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| diff_image(x, y))
        .collect::<Result<Vec<_>>>()?;
    Channels::new(diffs)
}

fn check_channel_count(a: &Channels, b: &Channels) -> Result<()> {
    if a.len() != b.len() {
        return Err(FreqError::InvalidParameter(format!(
            "channel count mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Linearly map `[min, max]` of the image to `[0, 1]` for display.
/// A constant image maps to all zeros.
pub fn normalize_for_display(data: &Array2<f32>) -> Array2<f32> {
    let (min, max) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return Array2::zeros(data.dim());
    }
    data.mapv(|v| (v - min) / range)
}
