mod common;

use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

use imagefreq_core::consts::KERNEL_SUM_TOLERANCE;
use imagefreq_core::error::FreqError;
use imagefreq_core::filters::{
    convolve_1d, convolve_2d_generic, convolve_2d_separable, dilated_b3_kernel, gaussian_blur,
    gaussian_kernel, ConvolveAxis, Kernel1D,
};
use imagefreq_core::psf::moffat_kernel;

use common::{max_abs_diff, smooth_pattern};

fn smoothing_kernels() -> Vec<(&'static str, Kernel1D)> {
    vec![
        ("gaussian 1.0", gaussian_kernel(1.0).unwrap()),
        ("gaussian 2.5", gaussian_kernel(2.5).unwrap()),
        ("b3 level 0", dilated_b3_kernel(0)),
        ("b3 level 3", dilated_b3_kernel(3)),
        ("moffat", moffat_kernel(2.0, 3.0, 10).unwrap()),
    ]
}

// --- Kernel construction ---

#[test]
fn test_smoothing_kernels_sum_to_one() {
    for (name, kernel) in smoothing_kernels() {
        assert!(
            (kernel.sum() - 1.0).abs() < KERNEL_SUM_TOLERANCE,
            "{name} kernel sums to {}",
            kernel.sum()
        );
    }
}

#[test]
fn test_dilated_kernel_length_and_zero_count() {
    let base = dilated_b3_kernel(0);
    assert_eq!(base.len(), 5);
    assert!(base.taps().iter().all(|&t| t != 0.0));

    for level in 1..=6usize {
        let kernel = dilated_b3_kernel(level);
        let gap = 1usize << (level - 1);
        assert_eq!(kernel.len(), 5 + 4 * gap, "length at level {level}");
        let zeros = kernel.taps().iter().filter(|&&t| t == 0.0).count();
        assert_eq!(zeros, 4 * gap, "zero taps at level {level}");
        assert_eq!(kernel.taps()[kernel.radius()], 6.0 / 16.0);
    }
}

#[test]
fn test_dilated_kernel_spaces_original_taps_evenly() {
    for level in 1..=6usize {
        let kernel = dilated_b3_kernel(level);
        let gap = 1usize << (level - 1);

        let nonzero: Vec<usize> = kernel
            .taps()
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0.0)
            .map(|(i, _)| i)
            .collect();
        let expected: Vec<usize> = (0..5).map(|k| k * (gap + 1)).collect();
        assert_eq!(nonzero, expected, "tap positions at level {level}");

        let values: Vec<f64> = nonzero.iter().map(|&i| kernel.taps()[i]).collect();
        assert_eq!(values, dilated_b3_kernel(0).taps(), "tap values at level {level}");
    }
}

#[test]
fn test_gaussian_kernel_is_symmetric() {
    let kernel = gaussian_kernel(1.7).unwrap();
    let taps = kernel.taps();
    for i in 0..taps.len() {
        assert_abs_diff_eq!(taps[i], taps[taps.len() - 1 - i], epsilon = 1e-15);
    }
}

// --- Boundary handling ---

#[test]
fn test_constant_image_preserved() {
    let data = Array2::<f32>::from_elem((5, 5), 0.7);
    for (name, kernel) in smoothing_kernels() {
        let out = convolve_2d_separable(&data, &kernel, &kernel).unwrap();
        for &v in out.iter() {
            assert!((v - 0.7).abs() < 1e-5, "{name}: constant not preserved, got {v}");
        }
    }
}

#[test]
fn test_clamp_replicates_edges() {
    let data = array![[1.0f32, 2.0, 3.0, 4.0]];

    let forward = Kernel1D::new(vec![0.0, 0.0, 1.0]).unwrap();
    let out = convolve_1d(&data, &forward, ConvolveAxis::Horizontal).unwrap();
    assert_eq!(out, array![[2.0f32, 3.0, 4.0, 4.0]]);

    let backward = Kernel1D::new(vec![1.0, 0.0, 0.0]).unwrap();
    let out = convolve_1d(&data, &backward, ConvolveAxis::Horizontal).unwrap();
    assert_eq!(out, array![[1.0f32, 1.0, 2.0, 3.0]]);
}

#[test]
fn test_vertical_pass_uses_rows() {
    let data = array![[1.0f32], [2.0], [3.0]];
    let forward = Kernel1D::new(vec![0.0, 0.0, 1.0]).unwrap();
    let out = convolve_1d(&data, &forward, ConvolveAxis::Vertical).unwrap();
    assert_eq!(out, array![[2.0f32], [3.0], [3.0]]);
}

#[test]
fn test_corner_pixel_sees_only_clamped_values() {
    let mut data = Array2::<f32>::zeros((6, 6));
    data[[0, 0]] = 1.0;
    let kernel = dilated_b3_kernel(0);
    let out = convolve_2d_separable(&data, &kernel, &kernel).unwrap();

    // Offsets -2, -1, 0 all clamp onto the corner: (1 + 4 + 6) / 16 per axis.
    let weight = (11.0f32 / 16.0).powi(2);
    assert!((out[[0, 0]] - weight).abs() < 1e-6, "corner = {}", out[[0, 0]]);
}

// --- Separable vs generic ---

#[test]
fn test_separable_matches_generic_outer_product() {
    let data = smooth_pattern(12, 9);
    let kx = gaussian_kernel(1.0).unwrap();
    let ky = dilated_b3_kernel(1);

    let kernel2d = Array2::from_shape_fn((ky.len(), kx.len()), |(i, j)| {
        (ky.taps()[i] * kx.taps()[j]) as f32
    });

    let separable = convolve_2d_separable(&data, &kx, &ky).unwrap();
    let generic = convolve_2d_generic(&data, &kernel2d).unwrap();

    let diff = max_abs_diff(&separable, &generic);
    assert!(diff < 1e-5, "separable and generic differ by {diff}");
}

#[test]
fn test_dilated_separable_matches_dense_generic() {
    // The 2D kernel keeps every zero tap, so this checks the sparse 1D path.
    let data = smooth_pattern(20, 17);
    for level in [2, 3] {
        let kernel = dilated_b3_kernel(level);
        let kernel2d = Array2::from_shape_fn((kernel.len(), kernel.len()), |(i, j)| {
            (kernel.taps()[i] * kernel.taps()[j]) as f32
        });

        let separable = convolve_2d_separable(&data, &kernel, &kernel).unwrap();
        let generic = convolve_2d_generic(&data, &kernel2d).unwrap();
        let diff = max_abs_diff(&separable, &generic);
        assert!(diff < 1e-5, "level {level}: separable and generic differ by {diff}");
    }
}

#[test]
fn test_generic_rejects_even_kernel() {
    let data = smooth_pattern(8, 8);
    let kernel = Array2::<f32>::ones((2, 3));
    assert!(matches!(
        convolve_2d_generic(&data, &kernel),
        Err(FreqError::InvalidKernel(_))
    ));
}

// --- Validation ---

#[test]
fn test_empty_image_rejected() {
    let empty = Array2::<f32>::zeros((0, 5));
    let kernel = dilated_b3_kernel(0);
    assert!(matches!(
        convolve_1d(&empty, &kernel, ConvolveAxis::Horizontal),
        Err(FreqError::InvalidShape { rows: 0, cols: 5 })
    ));
    assert!(matches!(
        gaussian_blur(&empty, 1.0),
        Err(FreqError::InvalidShape { .. })
    ));
}

#[test]
fn test_gaussian_blur_rejects_bad_sigma() {
    let data = smooth_pattern(8, 8);
    assert!(matches!(
        gaussian_blur(&data, 0.0),
        Err(FreqError::InvalidParameter(_))
    ));
    assert!(matches!(
        gaussian_blur(&data, f64::NAN),
        Err(FreqError::InvalidParameter(_))
    ));
}

#[test]
fn test_gaussian_blur_smooths_impulse() {
    let mut data = Array2::<f32>::zeros((15, 15));
    data[[7, 7]] = 1.0;
    let out = gaussian_blur(&data, 1.5).unwrap();

    let total: f32 = out.iter().sum();
    assert!((total - 1.0).abs() < 1e-4, "impulse mass = {total}");
    assert!(out[[7, 7]] < 1.0);
    assert!(out[[7, 7]] > out[[7, 8]]);
    assert!((out[[7, 8]] - out[[8, 7]]).abs() < 1e-6);
}
