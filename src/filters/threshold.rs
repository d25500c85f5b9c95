//! Threshold binarization: fixed and adaptive.
//!
//! Polarity is the same for both modes: dark pixels become
//! [`FOREGROUND`](crate::raster::FOREGROUND), i.e. dark structures on a
//! lighter background are what gets traced.
//!
//! Input is a luminance image; only channel 0 is read.

use ndarray::{Array2, ArrayView3};
use serde::{Deserialize, Serialize};

use super::core::{gaussian_kernel_1d, integral_image, rect_sum};
use crate::error::{check_odd_window, Result};
use crate::raster::BinaryMask;

/// How the local reference level of adaptive thresholding is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveMethod {
    /// Plain mean of the window
    #[default]
    Mean,
    /// Gaussian-weighted mean of the window
    Gaussian,
}

// ============================================================================
// Fixed Threshold
// ============================================================================

/// Fixed threshold: `pixel > threshold` is background, everything else foreground.
pub fn threshold_fixed(gray: ArrayView3<u8>, threshold: u8) -> BinaryMask {
    let (height, width, _) = gray.dim();
    let mut mask = BinaryMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            mask.set(x, y, gray[[y, x, 0]] <= threshold);
        }
    }

    mask
}

// ============================================================================
// Adaptive Threshold
// ============================================================================

/// Adaptive threshold against the local mean.
///
/// The window is `block_size x block_size`, clipped at the image border; the
/// mean divides by the number of in-bounds pixels only. A pixel is foreground
/// when `pixel <= mean - c`.
///
/// # Arguments
/// * `gray` - Luminance image (height, width, 1)
/// * `block_size` - Odd window size, at least 3
/// * `c` - Constant subtracted from the local mean
/// * `method` - Plain or Gaussian-weighted mean
///
/// # Errors
/// `InvalidWindow` when `block_size` is even or below 3.
pub fn threshold_adaptive(
    gray: ArrayView3<u8>,
    block_size: usize,
    c: i32,
    method: AdaptiveMethod,
) -> Result<BinaryMask> {
    check_odd_window("block size", block_size, 3)?;

    let mask = match method {
        AdaptiveMethod::Mean => adaptive_mean(gray, block_size, c),
        AdaptiveMethod::Gaussian => adaptive_gaussian(gray, block_size, c),
    };
    Ok(mask)
}

fn adaptive_mean(gray: ArrayView3<u8>, block_size: usize, c: i32) -> BinaryMask {
    let (height, width, _) = gray.dim();
    let mut mask = BinaryMask::new(width, height);
    let half = block_size / 2;
    let table = integral_image(&gray);

    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(width);

            let count = ((y1 - y0) * (x1 - x0)) as i64;
            let sum = rect_sum(&table, x0, y0, x1, y1) as i64;
            let pixel = gray[[y, x, 0]] as i64;

            // pixel <= sum/count - c, kept in integers
            mask.set(x, y, pixel * count <= sum - c as i64 * count);
        }
    }

    mask
}

fn adaptive_gaussian(gray: ArrayView3<u8>, block_size: usize, c: i32) -> BinaryMask {
    let (height, width, _) = gray.dim();
    let mut mask = BinaryMask::new(width, height);
    let half = block_size as isize / 2;
    let kernel = gaussian_kernel_1d(block_size, 0.0);

    // Horizontal pass, weights renormalized over the in-bounds part
    let mut temp = Array2::<f64>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f64;
            let mut weight = 0.0f64;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = x as isize + ki as isize - half;
                if sx < 0 || sx >= width as isize {
                    continue;
                }
                sum += gray[[y, sx as usize, 0]] as f64 * kv;
                weight += kv;
            }
            temp[[y, x]] = sum / weight;
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f64;
            let mut weight = 0.0f64;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = y as isize + ki as isize - half;
                if sy < 0 || sy >= height as isize {
                    continue;
                }
                sum += temp[[sy as usize, x]] * kv;
                weight += kv;
            }
            let mean = sum / weight;
            mask.set(x, y, gray[[y, x, 0]] as f64 <= mean - c as f64);
        }
    }

    mask
}

/// Fraction of foreground pixels, for logging.
pub(crate) fn foreground_ratio(mask: &BinaryMask) -> f32 {
    let total = mask.data().len().max(1);
    mask.foreground_count() as f32 / total as f32
}
