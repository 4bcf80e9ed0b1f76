use ndarray::Array2;

use crate::error::Result;
use crate::image::validate_image;

/// A detected point source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    pub peak: f32,
}

/// Find candidate stars: pixels at or above `threshold` that are strict
/// maxima of their 3x3 neighbourhood, excluding a `min_distance` border.
///
/// Any neighbour greater than or equal to the candidate disqualifies it, so a
/// flat-topped peak is not reported at all. There is no merging of nearby
/// detections; stars are returned in row-major scan order.
pub fn detect_stars(data: &Array2<f32>, threshold: f32, min_distance: usize) -> Result<Vec<Star>> {
    validate_image(data)?;
    let (h, w) = data.dim();
    // The 3x3 test needs at least one pixel of margin.
    let border = min_distance.max(1);

    let mut stars = Vec::new();
    if h <= 2 * border || w <= 2 * border {
        return Ok(stars);
    }

    for y in border..h - border {
        for x in border..w - border {
            let v = data[[y, x]];
            if v < threshold {
                continue;
            }
            if is_strict_local_max(data, x, y, v) {
                stars.push(Star { x, y, peak: v });
            }
        }
    }

    Ok(stars)
}

fn is_strict_local_max(data: &Array2<f32>, x: usize, y: usize, v: f32) -> bool {
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            if (ny, nx) != (y, x) && data[[ny, nx]] >= v {
                return false;
            }
        }
    }
    true
}
