/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// B3 spline 1D kernel coefficients: [1, 4, 6, 4, 1] / 16.
pub const B3_KERNEL: [f64; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// Largest level count accepted by the B3 wavelet transforms. The dilated
/// kernel at this level spans `5 + 4 * 2^(MAX_WAVELET_LEVELS - 1)` taps.
pub const MAX_WAVELET_LEVELS: usize = 16;

/// Gaussian support radius in units of sigma.
pub const GAUSSIAN_RADIUS_SIGMAS: f64 = 3.0;

/// Gaussian-consistency constant for the median absolute deviation
/// (1 / Phi^-1(3/4)).
pub const MAD_GAUSSIAN_SCALE: f64 = 1.4826;

/// Richardson-Lucy ratio guard: blurred samples at or below this yield a zero ratio.
pub const RL_EPSILON: f32 = 1e-6;

/// Tolerance used when checking that smoothing kernels sum to one.
pub const KERNEL_SUM_TOLERANCE: f64 = 1e-6;

/// Border (in pixels) excluded from star detection.
pub const DEFAULT_STAR_MIN_DISTANCE: usize = 10;

/// Half-size of the square patch cut around each detected star.
pub const DEFAULT_PSF_PATCH_RADIUS: usize = 10;

/// Maximum number of stars stacked into the PSF estimate.
pub const DEFAULT_PSF_MAX_STARS: usize = 50;

/// Radius of the separable Moffat kernel produced by PSF estimation.
pub const DEFAULT_PSF_KERNEL_RADIUS: usize = 10;

/// Moffat alpha search range and step for the grid-search fit.
pub const MOFFAT_ALPHA_MIN: f64 = 0.5;
pub const MOFFAT_ALPHA_MAX: f64 = 6.0;

/// Moffat beta search range for the grid-search fit.
pub const MOFFAT_BETA_MIN: f64 = 1.5;
pub const MOFFAT_BETA_MAX: f64 = 6.0;

/// Grid step shared by both Moffat parameters.
pub const MOFFAT_GRID_STEP: f64 = 0.1;

/// Default Richardson-Lucy iteration count.
pub const DEFAULT_RL_ITERATIONS: usize = 25;

/// Default base sigma of the dyadic multiband pyramid.
pub const DEFAULT_MULTIBAND_SIGMA: f64 = 1.0;

/// Default star detection threshold, in image intensity units.
pub const DEFAULT_STAR_THRESHOLD: f32 = 0.01;
