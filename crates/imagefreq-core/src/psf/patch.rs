use ndarray::{s, Array2};

use crate::error::{FreqError, Result};
use crate::image::ensure_same_shape;

/// Cut the `(2r+1) x (2r+1)` window centred on `(x, y)`.
/// Returns `None` when the window would leave the image.
pub fn extract_patch(data: &Array2<f32>, x: usize, y: usize, radius: usize) -> Option<Array2<f32>> {
    let (h, w) = data.dim();
    if x < radius || y < radius || x + radius >= w || y + radius >= h {
        return None;
    }
    Some(
        data.slice(s![y - radius..=y + radius, x - radius..=x + radius])
            .to_owned(),
    )
}

/// Scale a patch to unit sum. A zero-sum patch is left unchanged.
pub fn normalize_patch(patch: &mut Array2<f32>) {
    let sum: f64 = patch.iter().map(|&v| v as f64).sum();
    if sum == 0.0 {
        return;
    }
    let inv = (1.0 / sum) as f32;
    patch.mapv_inplace(|v| v * inv);
}

/// Average equally shaped patches into a single stacked estimate.
pub fn stack_patches(patches: &[Array2<f32>]) -> Result<Array2<f32>> {
    let first = patches
        .first()
        .ok_or_else(|| FreqError::InvalidParameter("no patches to stack".into()))?;

    let mut sum = Array2::<f64>::zeros(first.dim());
    for patch in patches {
        ensure_same_shape(first, patch)?;
        sum.zip_mut_with(patch, |acc, &v| *acc += v as f64);
    }

    let n = patches.len() as f64;
    Ok(sum.mapv(|v| (v / n) as f32))
}
