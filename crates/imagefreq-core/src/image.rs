use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{FreqError, Result};

/// Reject empty images. `Array2` is always rectangular, so an empty axis is
/// the only malformed shape that can reach the core through it.
pub fn validate_image(data: &Array2<f32>) -> Result<()> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Err(FreqError::InvalidShape { rows, cols });
    }
    Ok(())
}

/// Ensure `found` has the same shape as `expected`.
pub fn ensure_same_shape(expected: &Array2<f32>, found: &Array2<f32>) -> Result<()> {
    if expected.dim() != found.dim() {
        return Err(FreqError::ShapeMismatch {
            expected: expected.dim(),
            found: found.dim(),
        });
    }
    Ok(())
}

/// Build an image from row vectors, rejecting empty and ragged input.
pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Array2<f32>> {
    let h = rows.len();
    let w = rows.first().map_or(0, Vec::len);
    if h == 0 || w == 0 {
        return Err(FreqError::InvalidShape { rows: h, cols: w });
    }

    let mut flat = Vec::with_capacity(h * w);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != w {
            return Err(FreqError::RaggedRows {
                row,
                expected: w,
                found: values.len(),
            });
        }
        flat.extend(values);
    }

    Array2::from_shape_vec((h, w), flat).map_err(|_| FreqError::InvalidShape { rows: h, cols: w })
}

/// Convert an image back to row vectors.
pub fn to_rows(data: &Array2<f32>) -> Vec<Vec<f32>> {
    data.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// An ordered set of equally shaped channel images (e.g. R/G/B or L/a/b).
///
/// Channels never interact inside the core, so every per-channel operation
/// fans out with one rayon task per channel and joins before returning.
#[derive(Clone, Debug)]
pub struct Channels {
    channels: Vec<Array2<f32>>,
}

impl Channels {
    pub fn new(channels: Vec<Array2<f32>>) -> Result<Self> {
        let first = channels.first().ok_or(FreqError::InvalidShape { rows: 0, cols: 0 })?;
        validate_image(first)?;
        for channel in &channels[1..] {
            ensure_same_shape(first, channel)?;
        }
        Ok(Self { channels })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Shape shared by every channel, as `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) {
        self.channels[0].dim()
    }

    pub fn get(&self, index: usize) -> Option<&Array2<f32>> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Array2<f32>> {
        self.channels.iter()
    }

    pub fn into_inner(self) -> Vec<Array2<f32>> {
        self.channels
    }

    /// Run `f` on every channel in parallel and collect the results in channel order.
    pub fn map_parallel<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Array2<f32>) -> T + Sync + Send,
    {
        self.channels.par_iter().map(f).collect()
    }

    /// Fallible variant of [`Channels::map_parallel`] producing a new channel set.
    pub fn try_map_parallel<F>(&self, f: F) -> Result<Channels>
    where
        F: Fn(&Array2<f32>) -> Result<Array2<f32>> + Sync + Send,
    {
        let channels = self
            .channels
            .par_iter()
            .map(f)
            .collect::<Result<Vec<_>>>()?;
        Channels::new(channels)
    }
}
