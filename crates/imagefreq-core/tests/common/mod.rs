#![allow(dead_code)]

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness. Honors `RUST_LOG`; safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Smooth, non-constant test image with values in roughly [0.2, 0.8].
pub fn smooth_pattern(h: usize, w: usize) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        0.5 + 0.3 * (c as f32 * 0.15).sin() * (r as f32 * 0.1).cos()
    })
}

/// Zero-mean Gaussian noise, reproducible from `seed`.
pub fn gaussian_noise(h: usize, w: usize, sigma: f32, seed: u64) -> Array2<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0f32, sigma).expect("valid sigma");
    Array2::from_shape_fn((h, w), |_| normal.sample(&mut rng))
}

/// Unit-amplitude Gaussian blobs of width `sigma` on a flat background.
pub fn gaussian_blobs(
    h: usize,
    w: usize,
    background: f32,
    centers: &[(f32, f32)],
    sigma: f32,
) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        let blobs: f32 = centers
            .iter()
            .map(|&(cx, cy)| {
                let d2 = (c as f32 - cx).powi(2) + (r as f32 - cy).powi(2);
                (-d2 / (2.0 * sigma * sigma)).exp()
            })
            .sum();
        background + blobs
    })
}

/// Unit-peak Moffat stars centred on integer pixels, zero background.
/// `stars` holds `(x, y)` = `(column, row)`.
pub fn moffat_star_field(
    h: usize,
    w: usize,
    stars: &[(usize, usize)],
    alpha: f32,
    beta: f32,
) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        stars
            .iter()
            .map(|&(x, y)| {
                let d2 = (c as f32 - x as f32).powi(2) + (r as f32 - y as f32).powi(2);
                (1.0 + d2 / (alpha * alpha)).powf(-beta)
            })
            .sum()
    })
}

/// Root-mean-square difference between two images of equal shape.
pub fn rms_diff(a: &Array2<f32>, b: &Array2<f32>) -> f32 {
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| ((x - y) as f64).powi(2))
        .sum();
    (sum / a.len() as f64).sqrt() as f32
}

pub fn max_abs_diff(a: &Array2<f32>, b: &Array2<f32>) -> f32 {
    a.iter()
        .zip(b.iter())
        .fold(0.0f32, |acc, (&x, &y)| acc.max((x - y).abs()))
}
