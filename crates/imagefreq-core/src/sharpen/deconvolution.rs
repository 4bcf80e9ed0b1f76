use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_RL_ITERATIONS, RL_EPSILON};
use crate::error::Result;
use crate::filters::convolve::separable;
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::filters::kernel::{flip_kernel_1d, gaussian_kernel, Kernel1D};
use crate::image::validate_image;
use crate::psf::{estimate_psf, moffat_kernel, PsfEstimationConfig};

/// Where the deconvolution kernel pair comes from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PsfSource {
    /// Separable Gaussian of the given sigma.
    Gaussian { sigma: f64 },
    /// Known Moffat parameters.
    Moffat { alpha: f64, beta: f64, radius: usize },
    /// Fit a Moffat to the stars of the image being deconvolved.
    Estimated(PsfEstimationConfig),
}

impl Default for PsfSource {
    fn default() -> Self {
        Self::Estimated(PsfEstimationConfig::default())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeconvolutionConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub psf: PsfSource,
    /// Optional Gaussian blur applied to the result to tame ringing.
    #[serde(default)]
    pub post_blur_sigma: Option<f64>,
}

fn default_iterations() -> usize {
    DEFAULT_RL_ITERATIONS
}

impl Default for DeconvolutionConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_RL_ITERATIONS,
            psf: PsfSource::default(),
            post_blur_sigma: None,
        }
    }
}

/// Resolve the PSF source to a `(kx, ky)` kernel pair for `data`.
pub fn psf_kernels(data: &Array2<f32>, source: &PsfSource) -> Result<(Kernel1D, Kernel1D)> {
    match source {
        PsfSource::Gaussian { sigma } => {
            let k = gaussian_kernel(*sigma)?;
            Ok((k.clone(), k))
        }
        PsfSource::Moffat {
            alpha,
            beta,
            radius,
        } => {
            let k = moffat_kernel(*alpha, *beta, *radius)?;
            Ok((k.clone(), k))
        }
        PsfSource::Estimated(config) => {
            let estimate = estimate_psf(data, config)?;
            Ok((estimate.kx, estimate.ky))
        }
    }
}

/// Resolve the PSF and dispatch to Richardson-Lucy, then post-blur if configured.
pub fn deconvolve(data: &Array2<f32>, config: &DeconvolutionConfig) -> Result<Array2<f32>> {
    validate_image(data)?;
    let (kx, ky) = psf_kernels(data, &config.psf)?;
    let restored = richardson_lucy(data, &kx, &ky, config.iterations)?;

    match config.post_blur_sigma {
        Some(sigma) if sigma > 0.0 => gaussian_blur_array(&restored, sigma),
        _ => Ok(restored),
    }
}

/// Richardson-Lucy deconvolution with a separable PSF.
///
/// Starting from the observed image, each iteration blurs the estimate with
/// `(kx, ky)`, forms `observed / blurred` (0 where the blur is at or below
/// `RL_EPSILON`), back-projects the ratio through the flipped kernels and
/// multiplies it into the estimate. There is no automatic stopping; too many
/// iterations amplify noise and ringing.
pub fn richardson_lucy(
    observed: &Array2<f32>,
    kx: &Kernel1D,
    ky: &Kernel1D,
    iterations: usize,
) -> Result<Array2<f32>> {
    validate_image(observed)?;

    let kx_flip = flip_kernel_1d(kx);
    let ky_flip = flip_kernel_1d(ky);

    // Initial estimate = observed image
    let mut estimate = observed.clone();

    for iteration in 0..iterations {
        let blurred = separable(&estimate, kx, ky);

        let ratio = Zip::from(observed)
            .and(&blurred)
            .par_map_collect(|&obs, &blur| if blur > RL_EPSILON { obs / blur } else { 0.0 });

        let correction = separable(&ratio, &kx_flip, &ky_flip);
        estimate *= &correction;

        debug!(iteration, "Richardson-Lucy iteration");
    }

    info!(iterations, kernel_len = kx.len(), "Richardson-Lucy complete");
    Ok(estimate)
}
