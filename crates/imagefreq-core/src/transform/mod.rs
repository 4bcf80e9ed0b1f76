pub mod atrous;
pub mod multiband;
pub mod split;
pub mod swt;

use ndarray::{Array2, ArrayViewMut2};

use crate::error::{FreqError, Result};
use crate::image::{ensure_same_shape, validate_image, Channels};

pub use atrous::{atrous_decompose, atrous_reconstruct, AtrousTransform};
pub use multiband::{multiband_decompose, multiband_reconstruct, MultibandPyramid};
pub use split::{reconstruct_low_high, split_low_high, LowHighSplit};
pub use swt::{swt_decompose, swt_reconstruct, StationaryWavelet, SwtDecomposition};

/// Detail layers (finest first) plus the final low-pass residual.
///
/// Every layer has the residual's shape. Mutation is only exposed through
/// array views, so the shape invariant holds for the value's whole lifetime
/// and `reconstruct` cannot fail.
#[derive(Clone, Debug)]
pub struct Decomposition {
    layers: Vec<Array2<f32>>,
    residual: Array2<f32>,
}

impl Decomposition {
    pub fn new(layers: Vec<Array2<f32>>, residual: Array2<f32>) -> Result<Self> {
        validate_image(&residual)?;
        for layer in &layers {
            ensure_same_shape(&residual, layer)?;
        }
        Ok(Self { layers, residual })
    }

    /// Number of detail layers.
    pub fn levels(&self) -> usize {
        self.layers.len()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.residual.dim()
    }

    pub fn layers(&self) -> &[Array2<f32>] {
        &self.layers
    }

    pub fn layer(&self, level: usize) -> Option<&Array2<f32>> {
        self.layers.get(level)
    }

    pub fn layer_mut(&mut self, level: usize) -> Option<ArrayViewMut2<'_, f32>> {
        self.layers.get_mut(level).map(|l| l.view_mut())
    }

    /// Visit every detail layer mutably, finest first.
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, ArrayViewMut2<'_, f32>),
    {
        for (level, layer) in self.layers.iter_mut().enumerate() {
            f(level, layer.view_mut());
        }
    }

    pub fn residual(&self) -> &Array2<f32> {
        &self.residual
    }

    pub fn residual_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.residual.view_mut()
    }

    pub fn into_parts(self) -> (Vec<Array2<f32>>, Array2<f32>) {
        (self.layers, self.residual)
    }

    /// Sum the residual and every detail layer.
    pub fn reconstruct(&self) -> Array2<f32> {
        let mut result = self.residual.clone();
        for layer in &self.layers {
            result += layer;
        }
        result
    }

    /// Sum the residual and every detail layer scaled by its coefficient.
    /// Layers without a coefficient are added unscaled. Coefficients above
    /// one sharpen that scale, below one suppress it.
    pub fn reconstruct_weighted(&self, coefficients: &[f32]) -> Array2<f32> {
        let mut result = self.residual.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let coeff = coefficients.get(i).copied().unwrap_or(1.0);
            result.scaled_add(coeff, layer);
        }
        result
    }
}

/// A forward multiresolution decomposition paired with an exact inverse.
///
/// Implementations are pure: the same input always yields the same layers,
/// and `reconstruct(decompose(x))` reproduces `x` to f32 rounding.
pub trait MultiscaleTransform: Sync {
    fn name(&self) -> &str;

    fn decompose(&self, data: &Array2<f32>) -> Result<Decomposition>;

    fn reconstruct(&self, decomposition: &Decomposition) -> Array2<f32> {
        decomposition.reconstruct()
    }
}

/// Decompose every channel independently in parallel.
pub fn decompose_channels<T>(transform: &T, channels: &Channels) -> Result<Vec<Decomposition>>
where
    T: MultiscaleTransform + ?Sized,
{
    channels
        .map_parallel(|channel| transform.decompose(channel))
        .into_iter()
        .collect()
}

/// Reconstruct one image per decomposition, in parallel, as a channel set.
pub fn reconstruct_channels(decompositions: &[Decomposition]) -> Result<Channels> {
    use rayon::prelude::*;

    if decompositions.is_empty() {
        return Err(FreqError::InvalidParameter(
            "no decompositions to reconstruct".into(),
        ));
    }
    let images = decompositions
        .par_iter()
        .map(Decomposition::reconstruct)
        .collect();
    Channels::new(images)
}
