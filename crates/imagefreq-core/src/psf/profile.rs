use ndarray::Array2;

/// Radially averaged profile around the patch centre.
///
/// Pixels are binned by `floor` of their Euclidean distance from the centre;
/// bins run from 0 to `floor(min(cx, cy))`, pixels further out are ignored.
pub fn radial_profile(psf: &Array2<f32>) -> Vec<f64> {
    let (h, w) = psf.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }
    let cx = (w - 1) as f64 / 2.0;
    let cy = (h - 1) as f64 / 2.0;
    let max_r = cx.min(cy) as usize;

    let mut sum = vec![0.0f64; max_r + 1];
    let mut count = vec![0usize; max_r + 1];

    for ((y, x), &v) in psf.indexed_iter() {
        let r = (x as f64 - cx).hypot(y as f64 - cy) as usize;
        if r <= max_r {
            sum[r] += v as f64;
            count[r] += 1;
        }
    }

    sum.iter()
        .zip(&count)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect()
}

/// Rescale a profile so its centre bin is 1, matching the unit-peak Moffat
/// model. Profiles with a non-positive centre are returned unchanged.
pub fn normalize_to_peak(profile: &[f64]) -> Vec<f64> {
    match profile.first() {
        Some(&peak) if peak > 0.0 => profile.iter().map(|v| v / peak).collect(),
        _ => profile.to_vec(),
    }
}
