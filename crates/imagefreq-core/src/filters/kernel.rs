use crate::consts::{B3_KERNEL, GAUSSIAN_RADIUS_SIGMAS};
use crate::error::{FreqError, Result};

/// A symmetric-support 1D filter of odd length `2r + 1`, centered on tap `r`.
///
/// Taps are kept in f64 so that repeated passes accumulate in double precision.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    taps: Vec<f64>,
}

impl Kernel1D {
    pub fn new(taps: Vec<f64>) -> Result<Self> {
        if taps.is_empty() {
            return Err(FreqError::InvalidKernel("kernel has no taps".into()));
        }
        if taps.len() % 2 == 0 {
            return Err(FreqError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                taps.len()
            )));
        }
        Ok(Self { taps })
    }

    /// Build a kernel and scale it so its taps sum to one.
    pub fn normalized(taps: Vec<f64>) -> Result<Self> {
        let sum: f64 = taps.iter().sum();
        if sum.abs() < f64::EPSILON {
            return Err(FreqError::InvalidKernel("kernel taps sum to zero".into()));
        }
        Self::new(taps.into_iter().map(|t| t / sum).collect())
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn sum(&self) -> f64 {
        self.taps.iter().sum()
    }

    /// Reverse tap order, giving the adjoint filter.
    pub fn flipped(&self) -> Self {
        Self {
            taps: self.taps.iter().rev().copied().collect(),
        }
    }
}

/// Normalized 1D Gaussian with radius `ceil(3 * sigma)`.
pub fn gaussian_kernel(sigma: f64) -> Result<Kernel1D> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FreqError::InvalidParameter(format!(
            "Gaussian sigma must be positive, got {sigma}"
        )));
    }

    let radius = (GAUSSIAN_RADIUS_SIGMAS * sigma).ceil() as i64;
    let s2 = 2.0 * sigma * sigma;
    let taps = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / s2).exp())
        .collect();

    Kernel1D::normalized(taps)
}

/// B3-spline kernel dilated for an à trous / stationary wavelet level.
///
/// Level 0 is the plain 5-tap `[1, 4, 6, 4, 1] / 16`. Level `w >= 1` inserts
/// `2^(w-1)` zeros between adjacent taps, giving length `5 + 4 * 2^(w-1)`.
/// The transforms cap `w` at `MAX_WAVELET_LEVELS`.
pub fn dilated_b3_kernel(level: usize) -> Kernel1D {
    if level == 0 {
        return Kernel1D {
            taps: B3_KERNEL.to_vec(),
        };
    }

    let gap = 1usize << (level - 1);
    let mut taps = Vec::with_capacity(B3_KERNEL.len() + (B3_KERNEL.len() - 1) * gap);
    for (i, &tap) in B3_KERNEL.iter().enumerate() {
        taps.push(tap);
        if i < B3_KERNEL.len() - 1 {
            taps.extend(std::iter::repeat(0.0).take(gap));
        }
    }

    Kernel1D { taps }
}

/// Reverse a kernel's tap order.
pub fn flip_kernel_1d(kernel: &Kernel1D) -> Kernel1D {
    kernel.flipped()
}
