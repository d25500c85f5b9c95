//! Grayscale conversion filter.
//!
//! Uses ITU-R BT.601 luma coefficients.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - copied unchanged
//! - **RGB**: (height, width, 3) - weighted sum of R, G, B
//! - **RGBA**: (height, width, 4) - weighted sum of R, G, B, alpha ignored
//!
//! Output is always a single channel `(height, width, 1)` array.

use ndarray::{Array3, ArrayView3};

/// ITU-R BT.601 luma coefficients
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Luminance of one pixel, rounded to nearest.
#[inline]
fn luma_at(input: &ArrayView3<u8>, y: usize, x: usize, channels: usize) -> u8 {
    if channels < 3 {
        return input[[y, x, 0]];
    }
    let r = input[[y, x, 0]] as f32;
    let g = input[[y, x, 1]] as f32;
    let b = input[[y, x, 2]] as f32;
    (LUMA_R * r + LUMA_G * g + LUMA_B * b).round().clamp(0.0, 255.0) as u8
}

/// Convert an image to single-channel luminance.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `normalize` - Stretch the luminance range to 0-255 using the global min/max
///
/// # Returns
/// Array of shape (height, width, 1)
pub fn grayscale_u8(input: ArrayView3<u8>, normalize: bool) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    let mut min_l = u8::MAX;
    let mut max_l = u8::MIN;
    for y in 0..height {
        for x in 0..width {
            let l = luma_at(&input, y, x, channels);
            min_l = min_l.min(l);
            max_l = max_l.max(l);
            output[[y, x, 0]] = l;
        }
    }

    // Flat image: keep the plain luminance
    if normalize && max_l > min_l {
        let range = (max_l - min_l) as f32;
        output.mapv_inplace(|l| ((l - min_l) as f32 / range * 255.0).round() as u8);
    }

    output
}

/// Expand a single-channel image to RGBA with R=G=B=L and opaque alpha.
pub fn gray_to_rgba(gray: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = gray.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let l = gray[[y, x, 0]];
            output[[y, x, 0]] = l;
            output[[y, x, 1]] = l;
            output[[y, x, 2]] = l;
            output[[y, x, 3]] = 255;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(pixels: &[[u8; 4]], width: usize) -> Array3<u8> {
        let height = pixels.len() / width;
        Array3::from_shape_fn((height, width, 4), |(y, x, c)| pixels[y * width + x][c])
    }

    #[test]
    fn test_grayscale_red() {
        let img = rgba(&[[255, 0, 0, 255]], 1);
        let result = grayscale_u8(img.view(), false);

        // 0.299 * 255 = 76.2
        assert_eq!(result[[0, 0, 0]], 76);
        assert_eq!(result.dim(), (1, 1, 1));
    }

    #[test]
    fn test_grayscale_green_and_blue() {
        let img = rgba(&[[0, 255, 0, 255], [0, 0, 255, 255]], 2);
        let result = grayscale_u8(img.view(), false);

        // 0.587 * 255 = 149.7, 0.114 * 255 = 29.07
        assert_eq!(result[[0, 0, 0]], 150);
        assert_eq!(result[[0, 1, 0]], 29);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let img = rgba(&[[128, 128, 128, 0], [128, 128, 128, 255]], 2);
        let result = grayscale_u8(img.view(), false);
        assert_eq!(result[[0, 0, 0]], result[[0, 1, 0]]);
    }

    #[test]
    fn test_grayscale_idempotent_on_gray_input() {
        // Every gray level must survive an RGB -> L conversion unchanged
        let pixels: Vec<[u8; 4]> = (0..=255u8).map(|v| [v, v, v, 255]).collect();
        let img = rgba(&pixels, 16);
        let result = grayscale_u8(img.view(), false);
        for (i, p) in pixels.iter().enumerate() {
            assert_eq!(result[[i / 16, i % 16, 0]], p[0], "level {}", p[0]);
        }

        // And a second pass over the single-channel output is a no-op
        let again = grayscale_u8(result.view(), false);
        assert_eq!(again, result);
    }

    #[test]
    fn test_normalize_stretches_range() {
        let pixels = [[100, 100, 100, 255], [150, 150, 150, 255], [200, 200, 200, 255]];
        let img = rgba(&pixels, 3);
        let result = grayscale_u8(img.view(), true);

        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 1, 0]], 128); // 50/100*255 = 127.5
        assert_eq!(result[[0, 2, 0]], 255);
    }

    #[test]
    fn test_normalize_flat_image_keeps_luminance() {
        let pixels = [[90, 90, 90, 255]; 6];
        let img = rgba(&pixels, 3);
        let plain = grayscale_u8(img.view(), false);
        let normalized = grayscale_u8(img.view(), true);

        assert_eq!(normalized, plain);
        assert!(normalized.iter().all(|&v| v == 90));
    }

    #[test]
    fn test_gray_to_rgba() {
        let mut gray = Array3::<u8>::zeros((1, 2, 1));
        gray[[0, 1, 0]] = 42;
        let result = gray_to_rgba(gray.view());
        assert_eq!(result.dim(), (1, 2, 4));
        assert_eq!(
            [result[[0, 1, 0]], result[[0, 1, 1]], result[[0, 1, 2]], result[[0, 1, 3]]],
            [42, 42, 42, 255]
        );
        assert_eq!(result[[0, 0, 3]], 255);
    }
}
