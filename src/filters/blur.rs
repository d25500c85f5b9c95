//! 5x5 Gaussian blur for luminance images.
//!
//! Fixed binomial kernel with integer weights and divisor 256:
//!
//! ```text
//! 1  4  6  4 1
//! 4 16 24 16 4
//! 6 24 36 24 6
//! 4 16 24 16 4
//! 1  4  6  4 1
//! ```
//!
//! Border pixels are handled by clamp-extension: samples outside the image
//! reuse the nearest edge pixel, so every output pixel is a full convolution.

use ndarray::{Array3, ArrayView3};

use super::core::clamp_index;

/// Binomial weights; the 2D kernel is the outer product, total 256.
const BINOMIAL_5: [u32; 5] = [1, 4, 6, 4, 1];

/// Apply the 5x5 Gaussian blur.
///
/// Luminance is read from channel 0. For 3/4 channel input the result is
/// replicated across the color channels and alpha is set to 255.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Blurred image with the same shape
pub fn gaussian_blur_5x5_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for (ky, &wy) in BINOMIAL_5.iter().enumerate() {
                let sy = clamp_index(y as isize + ky as isize - 2, height);
                for (kx, &wx) in BINOMIAL_5.iter().enumerate() {
                    let sx = clamp_index(x as isize + kx as isize - 2, width);
                    sum += wy * wx * input[[sy, sx, 0]] as u32;
                }
            }

            // Round half up
            let value = ((sum + 128) >> 8) as u8;
            for c in 0..color_channels {
                output[[y, x, c]] = value;
            }
            if channels == 4 {
                output[[y, x, 3]] = 255;
            }
        }
    }

    output
}
