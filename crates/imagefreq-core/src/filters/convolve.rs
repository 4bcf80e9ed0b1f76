use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{FreqError, Result};
use crate::image::validate_image;

use super::kernel::Kernel1D;

/// Direction of a 1D convolution pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvolveAxis {
    /// Along each row (varying column index).
    Horizontal,
    /// Along each column (varying row index).
    Vertical,
}

/// Convolve every row or column of `data` with `kernel`.
///
/// Source indices outside the image are clamped to the nearest edge
/// (replicate-edge boundary). Accumulation is done in f64.
pub fn convolve_1d(data: &Array2<f32>, kernel: &Kernel1D, axis: ConvolveAxis) -> Result<Array2<f32>> {
    validate_image(data)?;
    Ok(convolve_axis(data, kernel, axis))
}

/// Separable 2D convolution: a horizontal pass with `kx` followed by a
/// vertical pass with `ky`.
pub fn convolve_2d_separable(data: &Array2<f32>, kx: &Kernel1D, ky: &Kernel1D) -> Result<Array2<f32>> {
    validate_image(data)?;
    Ok(separable(data, kx, ky))
}

/// Direct 2D convolution for kernels that do not factor into a row and a
/// column filter. Both kernel dimensions must be odd; the clamp policy is the
/// same as for the separable path.
pub fn convolve_2d_generic(data: &Array2<f32>, kernel: &Array2<f32>) -> Result<Array2<f32>> {
    validate_image(data)?;
    let (kh, kw) = kernel.dim();
    if kh == 0 || kw == 0 || kh % 2 == 0 || kw % 2 == 0 {
        return Err(FreqError::InvalidKernel(format!(
            "2D kernel dimensions must be odd, got {kh}x{kw}"
        )));
    }

    let (h, w) = data.dim();
    let ry = (kh / 2) as isize;
    let rx = (kw / 2) as isize;

    let fill_row = |row: usize, mut out: ArrayViewMut1<f32>| {
        for col in 0..w {
            let mut acc = 0.0f64;
            for ky in -ry..=ry {
                let src_row = clamp_index(row as isize + ky, h);
                for kx in -rx..=rx {
                    let src_col = clamp_index(col as isize + kx, w);
                    acc += data[[src_row, src_col]] as f64
                        * kernel[[(ky + ry) as usize, (kx + rx) as usize]] as f64;
                }
            }
            out[col] = acc as f32;
        }
    };

    Ok(fill_rows(h, w, fill_row))
}

/// Horizontal then vertical pass, without shape validation.
pub(crate) fn separable(data: &Array2<f32>, kx: &Kernel1D, ky: &Kernel1D) -> Array2<f32> {
    let row_pass = convolve_axis(data, kx, ConvolveAxis::Horizontal);
    convolve_axis(&row_pass, ky, ConvolveAxis::Vertical)
}

pub(crate) fn convolve_axis(data: &Array2<f32>, kernel: &Kernel1D, axis: ConvolveAxis) -> Array2<f32> {
    let (h, w) = data.dim();
    let taps = sparse_taps(kernel);

    match axis {
        ConvolveAxis::Horizontal => fill_rows(h, w, |row, mut out| {
            for col in 0..w {
                let mut acc = 0.0f64;
                for &(offset, kv) in &taps {
                    let src_col = clamp_index(col as isize + offset, w);
                    acc += data[[row, src_col]] as f64 * kv;
                }
                out[col] = acc as f32;
            }
        }),
        ConvolveAxis::Vertical => fill_rows(h, w, |row, mut out| {
            for col in 0..w {
                let mut acc = 0.0f64;
                for &(offset, kv) in &taps {
                    let src_row = clamp_index(row as isize + offset, h);
                    acc += data[[src_row, col]] as f64 * kv;
                }
                out[col] = acc as f32;
            }
        }),
    }
}

/// Non-zero taps as `(offset from centre, weight)`. Dilated kernels are
/// mostly zeros, so only the real taps are visited.
fn sparse_taps(kernel: &Kernel1D) -> Vec<(isize, f64)> {
    let radius = kernel.radius() as isize;
    kernel
        .taps()
        .iter()
        .enumerate()
        .filter(|&(_, &kv)| kv != 0.0)
        .map(|(i, &kv)| (i as isize - radius, kv))
        .collect()
}

/// Allocate an `h x w` output and fill it row by row. Each row is written by
/// exactly one task, so large images are split across the rayon pool.
fn fill_rows<F>(h: usize, w: usize, fill_row: F) -> Array2<f32>
where
    F: Fn(usize, ArrayViewMut1<f32>) + Sync + Send,
{
    let mut result = Array2::<f32>::zeros((h, w));

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, out)| fill_row(row, out));
    } else {
        for (row, out) in result.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(row, out);
        }
    }

    result
}

/// Replicate-edge boundary: clamp `idx` into `[0, size)`.
pub fn clamp_index(idx: isize, size: usize) -> usize {
    idx.clamp(0, size as isize - 1) as usize
}
