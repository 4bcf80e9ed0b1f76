use ndarray::{Array2, ArrayViewMut2};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::validate_image;

use super::atrous::{b3_decompose, check_levels};
use super::{Decomposition, MultiscaleTransform};

/// Stationary wavelet transform.
///
/// Shares the à trous dilation rule and clamped-edge convolution, but each
/// layer carries a noise-sigma slot that adaptive denoising fills in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StationaryWavelet {
    pub levels: usize,
}

impl MultiscaleTransform for StationaryWavelet {
    fn name(&self) -> &str {
        "stationary wavelet"
    }

    fn decompose(&self, data: &Array2<f32>) -> Result<Decomposition> {
        Ok(swt_decompose(data, self.levels)?.into_decomposition())
    }
}

/// SWT layers plus the per-layer noise sigma, `None` until estimated.
#[derive(Clone, Debug)]
pub struct SwtDecomposition {
    inner: Decomposition,
    sigmas: Vec<Option<f32>>,
}

impl SwtDecomposition {
    pub fn levels(&self) -> usize {
        self.inner.levels()
    }

    pub fn detail(&self, level: usize) -> Option<&Array2<f32>> {
        self.inner.layer(level)
    }

    pub fn detail_mut(&mut self, level: usize) -> Option<ArrayViewMut2<'_, f32>> {
        self.inner.layer_mut(level)
    }

    pub fn residual(&self) -> &Array2<f32> {
        self.inner.residual()
    }

    /// Noise sigma recorded for a layer, if any.
    pub fn sigma(&self, level: usize) -> Option<f32> {
        self.sigmas.get(level).copied().flatten()
    }

    pub fn set_sigma(&mut self, level: usize, sigma: f32) {
        if let Some(slot) = self.sigmas.get_mut(level) {
            *slot = Some(sigma);
        }
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.inner
    }

    pub fn into_decomposition(self) -> Decomposition {
        self.inner
    }

    pub fn reconstruct(&self) -> Array2<f32> {
        self.inner.reconstruct()
    }
}

impl From<SwtDecomposition> for Decomposition {
    fn from(swt: SwtDecomposition) -> Self {
        swt.inner
    }
}

pub fn swt_decompose(data: &Array2<f32>, levels: usize) -> Result<SwtDecomposition> {
    validate_image(data)?;
    check_levels(levels)?;
    let (layers, residual) = b3_decompose(data, levels);
    Ok(SwtDecomposition {
        inner: Decomposition::new(layers, residual)?,
        sigmas: vec![None; levels],
    })
}

pub fn swt_reconstruct(decomposition: &SwtDecomposition) -> Array2<f32> {
    decomposition.reconstruct()
}
