use serde::{Deserialize, Serialize};

use crate::consts::{
    MOFFAT_ALPHA_MAX, MOFFAT_ALPHA_MIN, MOFFAT_BETA_MAX, MOFFAT_BETA_MIN, MOFFAT_GRID_STEP,
};
use crate::error::{FreqError, Result};
use crate::filters::kernel::Kernel1D;

/// Isotropic Moffat profile `(1 + r^2 / alpha^2)^(-beta)` with unit peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsfModel {
    pub alpha: f64,
    pub beta: f64,
}

impl PsfModel {
    pub fn evaluate(&self, r: f64) -> f64 {
        (1.0 + (r * r) / (self.alpha * self.alpha)).powf(-self.beta)
    }

    /// Full width at half maximum: `2 alpha sqrt(2^(1/beta) - 1)`.
    pub fn fwhm(&self) -> f64 {
        2.0 * self.alpha * (2f64.powf(1.0 / self.beta) - 1.0).sqrt()
    }

    /// Normalized 1D kernel of the given radius. The same kernel serves as
    /// both the row and the column filter of the separable approximation.
    pub fn kernel(&self, radius: usize) -> Result<Kernel1D> {
        moffat_kernel(self.alpha, self.beta, radius)
    }
}

/// Result of the grid-search fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoffatFit {
    pub model: PsfModel,
    /// Sum of squared residuals at the optimum.
    pub residual: f64,
}

/// Brute-force least-squares fit of a unit-peak Moffat to a radial profile.
///
/// Searches alpha in [0.5, 6] and beta in [1.5, 6] with step 0.1, alpha in
/// the outer loop. On ties the first minimum in scan order wins.
pub fn fit_moffat(profile: &[f64]) -> MoffatFit {
    let alpha_steps = grid_steps(MOFFAT_ALPHA_MIN, MOFFAT_ALPHA_MAX);
    let beta_steps = grid_steps(MOFFAT_BETA_MIN, MOFFAT_BETA_MAX);

    let mut best = MoffatFit {
        model: PsfModel {
            alpha: MOFFAT_ALPHA_MIN,
            beta: MOFFAT_BETA_MIN,
        },
        residual: f64::INFINITY,
    };

    for i in 0..=alpha_steps {
        let alpha = MOFFAT_ALPHA_MIN + i as f64 * MOFFAT_GRID_STEP;
        for j in 0..=beta_steps {
            let model = PsfModel {
                alpha,
                beta: MOFFAT_BETA_MIN + j as f64 * MOFFAT_GRID_STEP,
            };
            let residual: f64 = profile
                .iter()
                .enumerate()
                .map(|(r, &v)| {
                    let d = v - model.evaluate(r as f64);
                    d * d
                })
                .sum();

            if residual < best.residual {
                best = MoffatFit { model, residual };
            }
        }
    }

    best
}

fn grid_steps(min: f64, max: f64) -> usize {
    ((max - min) / MOFFAT_GRID_STEP).round() as usize
}

/// Normalized 1D Moffat kernel of length `2 * radius + 1`.
pub fn moffat_kernel(alpha: f64, beta: f64, radius: usize) -> Result<Kernel1D> {
    if !alpha.is_finite() || alpha <= 0.0 || !beta.is_finite() {
        return Err(FreqError::InvalidParameter(format!(
            "Moffat parameters must be finite with alpha > 0, got alpha={alpha}, beta={beta}"
        )));
    }
    let model = PsfModel { alpha, beta };
    let r = radius as i64;
    let taps = (-r..=r).map(|i| model.evaluate(i as f64)).collect();
    Kernel1D::normalized(taps)
}
