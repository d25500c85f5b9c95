//! Core utilities shared by several filters:
//! - Gaussian kernel generation
//! - Integral image (summed-area table)
//! - Clamped coordinate lookup

use ndarray::{Array2, ArrayView3};

/// Generate a normalized 1D Gaussian kernel of an explicit odd size.
///
/// # Arguments
/// * `size` - Kernel length (odd)
/// * `sigma` - Standard deviation; non-positive values derive sigma from the size
///
/// # Returns
/// Normalized kernel as Vec<f64>
pub fn gaussian_kernel_1d(size: usize, sigma: f64) -> Vec<f64> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let half = (size / 2) as f64;

    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f64 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Clamp a signed coordinate into `0..len`.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Summed-area table of channel 0 with a zero row/column prepended.
///
/// `table[[y, x]]` is the sum of all pixels in rows `0..y` and columns `0..x`.
pub fn integral_image(input: &ArrayView3<u8>) -> Array2<u64> {
    let (height, width, _) = input.dim();
    let mut table = Array2::<u64>::zeros((height + 1, width + 1));

    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += input[[y, x, 0]] as u64;
            table[[y + 1, x + 1]] = table[[y, x + 1]] + row_sum;
        }
    }

    table
}

/// Sum over the half-open rectangle `[x0, x1) x [y0, y1)` of an integral image.
#[inline]
pub fn rect_sum(table: &Array2<u64>, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
    table[[y1, x1]] + table[[y0, x0]] - table[[y0, x1]] - table[[y1, x0]]
}
