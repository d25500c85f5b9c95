//! Canny-style edge detection producing a binary edge mask.
//!
//! Algorithm:
//! - Sobel 3x3 gradients on interior pixels (the outer 1-pixel frame has zero magnitude)
//! - Non-maximum suppression with the direction quantized into 4 sectors
//! - Double threshold into strong / weak / none
//! - Hysteresis: 8-connected flood fill from strong pixels through weak ones
//!
//! Thresholds are in raw Sobel magnitude units of an 8-bit image
//! (a full black/white step gives 1020).

use ndarray::{Array2, ArrayView3};

use crate::raster::BinaryMask;

/// Default strong-edge threshold.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 50.0;
/// Default weak-edge threshold.
pub const DEFAULT_LOW_THRESHOLD: f32 = 20.0;

/// Per-pixel Sobel response.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub gx: Array2<f32>,
    pub gy: Array2<f32>,
    pub magnitude: Array2<f32>,
}

impl Gradients {
    /// Gradient direction `atan2(gy, gx)` in radians at `(x, y)`.
    pub fn direction(&self, x: usize, y: usize) -> f32 {
        self.gy[[y, x]].atan2(self.gx[[y, x]])
    }
}

// ============================================================================
// Sobel Gradients
// ============================================================================

/// Compute Sobel gradients of a luminance image (channel 0).
pub fn sobel_gradients(gray: ArrayView3<u8>) -> Gradients {
    let (height, width, _) = gray.dim();
    let mut gx = Array2::<f32>::zeros((height, width));
    let mut gy = Array2::<f32>::zeros((height, width));
    let mut magnitude = Array2::<f32>::zeros((height, width));

    let kernel_h: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    let kernel_v: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sx = 0i32;
            let mut sy = 0i32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let lum = gray[[y + ky - 1, x + kx - 1, 0]] as i32;
                    sx += lum * kernel_h[ky][kx];
                    sy += lum * kernel_v[ky][kx];
                }
            }

            gx[[y, x]] = sx as f32;
            gy[[y, x]] = sy as f32;
            magnitude[[y, x]] = ((sx * sx + sy * sy) as f32).sqrt();
        }
    }

    Gradients { gx, gy, magnitude }
}

// ============================================================================
// Non-Maximum Suppression
// ============================================================================

/// Neighbor offsets `(backward, forward)` along the quantized gradient direction.
fn sector_offsets(gx: f32, gy: f32) -> ((isize, isize), (isize, isize)) {
    let mut angle = gy.atan2(gx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    if angle >= 180.0 {
        angle -= 180.0;
    }

    if !(22.5..157.5).contains(&angle) {
        // Horizontal gradient: compare left / right
        ((-1, 0), (1, 0))
    } else if angle < 67.5 {
        // 45 degrees (y down): compare up-left / down-right
        ((-1, -1), (1, 1))
    } else if angle < 112.5 {
        // Vertical gradient: compare up / down
        ((0, -1), (0, 1))
    } else {
        // 135 degrees: compare up-right / down-left
        ((1, -1), (-1, 1))
    }
}

/// Zero out every pixel that is not a local maximum along its gradient.
///
/// A pixel survives when it is strictly greater than the backward neighbor and
/// not smaller than the forward one, so a two-pixel plateau keeps one pixel.
pub fn non_max_suppression(gradients: &Gradients) -> Array2<f32> {
    let (height, width) = gradients.magnitude.dim();
    let mut output = Array2::<f32>::zeros((height, width));
    if height < 3 || width < 3 {
        return output;
    }

    let mag = &gradients.magnitude;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let m = mag[[y, x]];
            if m <= 0.0 {
                continue;
            }

            let ((bx, by), (fx, fy)) = sector_offsets(gradients.gx[[y, x]], gradients.gy[[y, x]]);
            let backward = mag[[(y as isize + by) as usize, (x as isize + bx) as usize]];
            let forward = mag[[(y as isize + fy) as usize, (x as isize + fx) as usize]];

            if m > backward && m >= forward {
                output[[y, x]] = m;
            }
        }
    }

    output
}

// ============================================================================
// Double Threshold + Hysteresis
// ============================================================================

/// Classify suppressed magnitudes and keep weak pixels connected to strong ones.
pub(crate) fn hysteresis(suppressed: &Array2<f32>, low: f32, high: f32) -> BinaryMask {
    let (height, width) = suppressed.dim();
    let mut mask = BinaryMask::new(width, height);
    let mut weak = vec![false; width * height];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let v = suppressed[[y, x]];
            if v >= high {
                mask.set(x, y, true);
                stack.push((x, y));
            } else if v >= low && v > 0.0 {
                weak[y * width + x] = true;
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);

        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * width + nx;
                if weak[nidx] {
                    weak[nidx] = false;
                    mask.set(nx, ny, true);
                    stack.push((nx, ny));
                }
            }
        }
    }

    mask
}

/// Canny-style edge detection.
///
/// # Arguments
/// * `gray` - Luminance image (height, width, 1)
/// * `low_threshold` - Weak edge threshold
/// * `high_threshold` - Strong edge threshold (swapped with `low_threshold` if smaller)
///
/// # Returns
/// Edge mask: confirmed edge pixels are foreground
pub fn canny_u8(gray: ArrayView3<u8>, low_threshold: f32, high_threshold: f32) -> BinaryMask {
    let (mut low, mut high) = (low_threshold, high_threshold);
    if high < low {
        log::warn!("canny: low threshold {} above high threshold {}, swapping", low, high);
        std::mem::swap(&mut low, &mut high);
    }

    let gradients = sobel_gradients(gray);
    let suppressed = non_max_suppression(&gradients);
    let mask = hysteresis(&suppressed, low, high);

    log::debug!(
        "canny: {} edge pixels (low={}, high={})",
        mask.foreground_count(),
        low,
        high
    );
    mask
}
