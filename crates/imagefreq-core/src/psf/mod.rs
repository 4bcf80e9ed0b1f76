pub mod detection;
pub mod moffat;
pub mod patch;
pub mod profile;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{
    DEFAULT_PSF_KERNEL_RADIUS, DEFAULT_PSF_MAX_STARS, DEFAULT_PSF_PATCH_RADIUS,
    DEFAULT_STAR_MIN_DISTANCE, DEFAULT_STAR_THRESHOLD,
};
use crate::error::{FreqError, Result};
use crate::filters::kernel::Kernel1D;

pub use detection::{detect_stars, Star};
pub use moffat::{fit_moffat, moffat_kernel, MoffatFit, PsfModel};
pub use patch::{extract_patch, normalize_patch, stack_patches};
pub use profile::{normalize_to_peak, radial_profile};

/// Configuration for estimating a PSF from the stars in an image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PsfEstimationConfig {
    /// Minimum peak intensity of a star candidate.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Border excluded from detection.
    #[serde(default = "default_min_distance")]
    pub min_distance: usize,
    /// Half-size of the stacked star patches.
    #[serde(default = "default_patch_radius")]
    pub patch_radius: usize,
    /// Maximum number of stars stacked, in detection order.
    #[serde(default = "default_max_stars")]
    pub max_stars: usize,
    /// Radius of the output Moffat kernel.
    #[serde(default = "default_kernel_radius")]
    pub kernel_radius: usize,
}

fn default_threshold() -> f32 {
    DEFAULT_STAR_THRESHOLD
}
fn default_min_distance() -> usize {
    DEFAULT_STAR_MIN_DISTANCE
}
fn default_patch_radius() -> usize {
    DEFAULT_PSF_PATCH_RADIUS
}
fn default_max_stars() -> usize {
    DEFAULT_PSF_MAX_STARS
}
fn default_kernel_radius() -> usize {
    DEFAULT_PSF_KERNEL_RADIUS
}

impl Default for PsfEstimationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STAR_THRESHOLD,
            min_distance: DEFAULT_STAR_MIN_DISTANCE,
            patch_radius: DEFAULT_PSF_PATCH_RADIUS,
            max_stars: DEFAULT_PSF_MAX_STARS,
            kernel_radius: DEFAULT_PSF_KERNEL_RADIUS,
        }
    }
}

/// Fitted PSF and the separable kernel pair derived from it.
#[derive(Clone, Debug)]
pub struct PsfEstimate {
    pub model: PsfModel,
    /// Number of star patches that went into the stack.
    pub star_count: usize,
    /// Radial profile of the stacked patch (unit sum, not peak-normalized).
    pub profile: Vec<f64>,
    pub kx: Kernel1D,
    pub ky: Kernel1D,
}

/// Estimate a separable Moffat PSF from point sources.
///
/// Pipeline: detect stars -> cut and unit-normalize patches (first
/// `max_stars` in scan order) -> average -> radial profile -> grid-search
/// Moffat fit -> 1D kernel used for both axes.
pub fn estimate_psf(data: &Array2<f32>, config: &PsfEstimationConfig) -> Result<PsfEstimate> {
    let stars = detect_stars(data, config.threshold, config.min_distance)?;
    debug!(candidates = stars.len(), "Star detection");

    let patches: Vec<Array2<f32>> = stars
        .iter()
        .filter_map(|star| extract_patch(data, star.x, star.y, config.patch_radius))
        .take(config.max_stars)
        .map(|mut patch| {
            normalize_patch(&mut patch);
            patch
        })
        .collect();

    if patches.is_empty() {
        return Err(FreqError::NoStarsDetected {
            threshold: config.threshold,
        });
    }

    let stacked = stack_patches(&patches)?;
    let profile = radial_profile(&stacked);
    let fit = fit_moffat(&normalize_to_peak(&profile));
    let kernel = fit.model.kernel(config.kernel_radius)?;

    info!(
        stars = patches.len(),
        alpha = fit.model.alpha,
        beta = fit.model.beta,
        fwhm = fit.model.fwhm(),
        "PSF estimated"
    );

    Ok(PsfEstimate {
        model: fit.model,
        star_count: patches.len(),
        profile,
        kx: kernel.clone(),
        ky: kernel,
    })
}
