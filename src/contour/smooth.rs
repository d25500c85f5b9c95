//! Moving-average contour smoothing.
//!
//! Each point is replaced by the rounded centroid of the `window` points
//! centered on it. Indices wrap around, so closed contours smooth across the
//! seam. Open contours wrap as well; their two ends get pulled toward each
//! other, which is accepted for the small windows used in practice.

use super::{Contour, Point};
use crate::error::{check_odd_window, Result};

/// Default moving-average window.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Smooth one contour.
///
/// # Arguments
/// * `contour` - Contour to smooth (left untouched)
/// * `window` - Odd window size, at least 1; 1 returns an identical copy
///
/// # Returns
/// A new contour with the same number of points and the same `closed` flag
pub fn smooth_contour(contour: &Contour, window: usize) -> Result<Contour> {
    check_odd_window("smoothing window", window, 1)?;

    let n = contour.points.len();
    if window == 1 || n == 0 {
        return Ok(contour.clone());
    }

    let half = (window / 2) as isize;
    let points = (0..n)
        .map(|i| {
            let mut sum_x = 0u64;
            let mut sum_y = 0u64;
            for j in -half..=half {
                let idx = (i as isize + j).rem_euclid(n as isize) as usize;
                let p = contour.points[idx];
                sum_x += p.x as u64;
                sum_y += p.y as u64;
            }
            Point::new(rounded_mean(sum_x, window), rounded_mean(sum_y, window))
        })
        .collect();

    Ok(Contour::new(points, contour.closed))
}

/// Smooth every contour with the same window.
pub fn smooth_contours(contours: &[Contour], window: usize) -> Result<Vec<Contour>> {
    contours.iter().map(|c| smooth_contour(c, window)).collect()
}

/// Half-up rounding of `sum / count`.
fn rounded_mean(sum: u64, count: usize) -> u32 {
    let count = count as u64;
    ((sum * 2 + count) / (count * 2)) as u32
}
