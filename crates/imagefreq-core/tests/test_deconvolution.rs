mod common;

use ndarray::Array2;

use imagefreq_core::filters::{convolve_2d_separable, gaussian_kernel, Kernel1D};
use imagefreq_core::psf::PsfEstimationConfig;
use imagefreq_core::sharpen::deconvolution::psf_kernels;
use imagefreq_core::sharpen::{
    deconvolve, richardson_lucy, sharpen, DeconvolutionConfig, PsfSource, WaveletSharpenParams,
};

use common::{gaussian_blobs, max_abs_diff, moffat_star_field, rms_diff};

fn blob_truth() -> Array2<f32> {
    gaussian_blobs(40, 40, 0.2, &[(12.0, 12.0), (25.0, 28.0), (30.0, 10.0)], 1.2)
}

// --- Richardson-Lucy ---

#[test]
fn test_flat_image_stays_flat() {
    let data = Array2::<f32>::from_elem((32, 32), 0.4);
    let kernel = gaussian_kernel(2.0).unwrap();
    let restored = richardson_lucy(&data, &kernel, &kernel, 20).unwrap();
    let diff = max_abs_diff(&data, &restored);
    assert!(diff < 1e-4, "flat image drifted by {diff}");
}

#[test]
fn test_zero_iterations_returns_observed() {
    let data = blob_truth();
    let kernel = gaussian_kernel(1.5).unwrap();
    let restored = richardson_lucy(&data, &kernel, &kernel, 0).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn test_error_decreases_with_iterations() {
    let truth = blob_truth();
    let kernel = gaussian_kernel(1.5).unwrap();
    let observed = convolve_2d_separable(&truth, &kernel, &kernel).unwrap();

    let err = |iterations: usize| -> f32 {
        let restored = richardson_lucy(&observed, &kernel, &kernel, iterations).unwrap();
        rms_diff(&restored, &truth)
    };
    let e0 = err(0);
    let e5 = err(5);
    let e25 = err(25);

    assert!(e5 < e0, "5 iterations did not improve: {e0} -> {e5}");
    assert!(e25 < e5, "25 iterations did not improve: {e5} -> {e25}");
}

#[test]
fn test_zero_blur_guard_produces_no_nan() {
    // Far from the impulse the blur is zero and the ratio hits the guard.
    let mut data = Array2::<f32>::zeros((16, 16));
    data[[8, 8]] = 1.0;
    let kernel = gaussian_kernel(1.0).unwrap();
    let restored = richardson_lucy(&data, &kernel, &kernel, 10).unwrap();
    assert!(restored.iter().all(|v| v.is_finite()));

    // A black image blurs to zero everywhere.
    let black = Array2::<f32>::zeros((8, 8));
    let restored = richardson_lucy(&black, &kernel, &kernel, 5).unwrap();
    assert!(restored.iter().all(|&v| v == 0.0));
}

#[test]
fn test_asymmetric_kernels_are_accepted() {
    let truth = blob_truth();
    let kx = Kernel1D::normalized(vec![0.1, 0.2, 0.4, 0.2, 0.1]).unwrap();
    let ky = Kernel1D::normalized(vec![0.5, 0.3, 0.2]).unwrap();
    let observed = convolve_2d_separable(&truth, &kx, &ky).unwrap();
    let restored = richardson_lucy(&observed, &kx, &ky, 10).unwrap();
    assert!(rms_diff(&restored, &truth) < rms_diff(&observed, &truth));
}

// --- deconvolve() dispatch ---

#[test]
fn test_deconvolve_with_gaussian_psf() {
    let truth = blob_truth();
    let kernel = gaussian_kernel(1.5).unwrap();
    let observed = convolve_2d_separable(&truth, &kernel, &kernel).unwrap();

    let config = DeconvolutionConfig {
        iterations: 10,
        psf: PsfSource::Gaussian { sigma: 1.5 },
        post_blur_sigma: None,
    };
    let restored = deconvolve(&observed, &config).unwrap();
    let direct = richardson_lucy(&observed, &kernel, &kernel, 10).unwrap();
    assert_eq!(restored, direct);
}

#[test]
fn test_deconvolve_post_blur_smooths_result() {
    let truth = blob_truth();
    let kernel = gaussian_kernel(1.5).unwrap();
    let observed = convolve_2d_separable(&truth, &kernel, &kernel).unwrap();

    let mut config = DeconvolutionConfig {
        iterations: 10,
        psf: PsfSource::Gaussian { sigma: 1.5 },
        post_blur_sigma: None,
    };
    let sharp = deconvolve(&observed, &config).unwrap();
    config.post_blur_sigma = Some(1.0);
    let softened = deconvolve(&observed, &config).unwrap();

    let peak = |a: &Array2<f32>| a.iter().fold(f32::MIN, |m, &v| m.max(v));
    assert!(peak(&softened) < peak(&sharp));
}

#[test]
fn test_psf_kernels_from_moffat_source() {
    let data = Array2::<f32>::zeros((8, 8));
    let source = PsfSource::Moffat {
        alpha: 2.0,
        beta: 3.0,
        radius: 6,
    };
    let (kx, ky) = psf_kernels(&data, &source).unwrap();
    assert_eq!(kx.len(), 13);
    assert_eq!(kx, ky);
    assert!((kx.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_deconvolve_with_estimated_psf() {
    let stars = [(30, 30), (70, 40), (45, 80), (90, 95)];
    let field = moffat_star_field(128, 128, &stars, 2.0, 3.0);

    let config = DeconvolutionConfig {
        iterations: 5,
        psf: PsfSource::Estimated(PsfEstimationConfig::default()),
        post_blur_sigma: None,
    };
    let restored = deconvolve(&field, &config).unwrap();

    // Point sources get tighter: the peak rises.
    for &(x, y) in &stars {
        assert!(
            restored[[y, x]] > field[[y, x]],
            "star at ({x},{y}) did not sharpen"
        );
    }
}

#[test]
fn test_deconvolve_without_stars_fails() {
    let data = Array2::<f32>::zeros((64, 64));
    let config = DeconvolutionConfig::default();
    assert!(deconvolve(&data, &config).is_err());
}

// --- Wavelet sharpening ---

#[test]
fn test_sharpening_increases_edge_contrast() {
    let mut data = Array2::<f32>::from_elem((32, 32), 0.2);
    for r in 0..32 {
        for c in 16..32 {
            data[[r, c]] = 0.8;
        }
    }

    let params = WaveletSharpenParams {
        num_layers: 4,
        coefficients: vec![2.0, 1.5, 1.0, 1.0],
        denoise: vec![],
    };
    let sharpened = sharpen(&data, &params).unwrap();

    assert!(sharpened[[16, 15]] < data[[16, 15]], "dark side not darker");
    assert!(sharpened[[16, 16]] > data[[16, 16]], "bright side not brighter");
}

#[test]
fn test_unit_coefficients_are_identity() {
    let data = blob_truth();
    let params = WaveletSharpenParams {
        num_layers: 5,
        coefficients: vec![1.0; 5],
        denoise: vec![],
    };
    let out = sharpen(&data, &params).unwrap();
    assert!(max_abs_diff(&data, &out) < 1e-4);
}
