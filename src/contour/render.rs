//! Contour visualization.
//!
//! Three modes, all producing a new RGBA raster:
//! - **Outline**: contours stroked over the source image
//! - **Filled**: interiors painted with a highlight color, then stroked (the
//!   pipeline draws these on a [`FILLED_BACKGROUND`] canvas)
//! - **Mask extraction**: source pixels kept inside contours, transparent black elsewhere
//!
//! Interiors use an even-odd scanline fill sampled at pixel centers. An edge
//! crosses row `y` when `y0 <= y < y1`, so shared vertices are counted once.
//! The boundary pixels themselves are always painted by the stroke.

use ndarray::Array3;

use super::Contour;
use crate::raster::{BinaryMask, Raster};

/// Outline color of the overlay visualization.
pub const OUTLINE_COLOR: [u8; 4] = [0, 255, 0, 255];
/// Interior color of the filled visualization.
pub const HIGHLIGHT_COLOR: [u8; 4] = [0, 200, 175, 255];
/// Canvas of the filled visualization: almost black, opaque.
pub const FILLED_BACKGROUND: [u8; 4] = [1, 1, 1, 255];

/// Stroke parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    /// RGBA stroke color
    pub color: [u8; 4],
    /// Stroke width in pixels (0 is treated as 1)
    pub line_width: u8,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: OUTLINE_COLOR,
            line_width: 1,
        }
    }
}

// ============================================================================
// Stroke
// ============================================================================

/// Paint a square brush of `half_width` around `(x, y)`, clipped to the image.
fn plot(output: &mut Array3<u8>, x: i32, y: i32, half_width: i32, color: &[u8; 4]) {
    let (height, width, channels) = output.dim();
    for py in (y - half_width)..=(y + half_width) {
        if py < 0 || py >= height as i32 {
            continue;
        }
        for px in (x - half_width)..=(x + half_width) {
            if px < 0 || px >= width as i32 {
                continue;
            }
            for c in 0..channels.min(4) {
                output[[py as usize, px as usize, c]] = color[c];
            }
        }
    }
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints visited.
fn walk_line((x0, y0): (i32, i32), (x1, y1): (i32, i32), mut visit: impl FnMut(i32, i32)) {
    let (mut x, mut y) = (x0, y0);
    let dx_abs = (x1 - x0).abs();
    let dy_abs = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx_abs - dy_abs;

    loop {
        visit(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy_abs {
            err -= dy_abs;
            x += sx;
        }
        if e2 < dx_abs {
            err += dx_abs;
            y += sy;
        }
    }
}

/// Visit every segment of the polyline, plus the closing one when `closed`.
fn walk_polyline(points: &[(i32, i32)], closed: bool, mut visit: impl FnMut(i32, i32)) {
    match points {
        [] => {}
        [only] => visit(only.0, only.1),
        _ => {
            for pair in points.windows(2) {
                walk_line(pair[0], pair[1], &mut visit);
            }
            if closed {
                walk_line(points[points.len() - 1], points[0], &mut visit);
            }
        }
    }
}

fn as_coords(contour: &Contour) -> Vec<(i32, i32)> {
    contour.points.iter().map(|p| (p.x as i32, p.y as i32)).collect()
}

/// Stroke a contour as a polyline; the closing segment is drawn only for closed contours.
fn stroke_contour(output: &mut Array3<u8>, contour: &Contour, style: &RenderStyle) {
    let half_width = (style.line_width.max(1) / 2) as i32;
    walk_polyline(&as_coords(contour), contour.closed, |x, y| {
        plot(output, x, y, half_width, &style.color)
    });
}

// ============================================================================
// Scanline Fill
// ============================================================================

/// Even-odd spans of the polygon through the contour points on row `y`.
fn row_spans(contour: &Contour, y: i32, width: usize) -> Vec<(usize, usize)> {
    let points = &contour.points;
    let n = points.len();
    let yf = y as f64;

    let mut crossings: Vec<f64> = Vec::new();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ay, by) = (a.y as f64, b.y as f64);
        if ay == by {
            continue;
        }
        let (lo, hi) = if ay < by { (ay, by) } else { (by, ay) };
        if yf < lo || yf >= hi {
            continue;
        }
        let t = (yf - ay) / (by - ay);
        crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    let max_x = width as f64 - 1.0;
    crossings
        .chunks_exact(2)
        .filter_map(|pair| {
            let start = pair[0].ceil().max(0.0);
            let end = pair[1].floor().min(max_x);
            (start <= end).then_some((start as usize, end as usize))
        })
        .collect()
}

/// Mark the interior and the boundary of `contour` in `mask`.
///
/// The polygon is always treated as closed, open contours included.
pub(crate) fn fill_contour_into(mask: &mut BinaryMask, contour: &Contour) {
    let (width, height) = (mask.width(), mask.height());
    let Some((min, max)) = contour.bounding_box() else {
        return;
    };

    if contour.len() >= 3 {
        let y_end = (max.y as usize).min(height.saturating_sub(1));
        for y in min.y as usize..=y_end {
            for (x0, x1) in row_spans(contour, y as i32, width) {
                for x in x0..=x1 {
                    mask.set(x, y, true);
                }
            }
        }
    }

    // Boundary, closing segment included
    walk_polyline(&as_coords(contour), true, |x, y| {
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            mask.set(x as usize, y as usize, true);
        }
    });
}

/// Union of the filled regions of all contours.
pub fn fill_mask(width: usize, height: usize, contours: &[Contour]) -> BinaryMask {
    let mut mask = BinaryMask::new(width, height);
    for contour in contours {
        fill_contour_into(&mut mask, contour);
    }
    mask
}

// ============================================================================
// Visualizations
// ============================================================================

/// Stroke all contours over an RGBA copy of `base`.
pub fn render_outline(base: &Raster, contours: &[Contour], style: &RenderStyle) -> Raster {
    let mut output = base.to_rgba().into_array();
    for contour in contours {
        stroke_contour(&mut output, contour, style);
    }
    Raster::wrap(output)
}

/// Paint contour interiors with `fill_color`, then stroke them.
///
/// # Arguments
/// * `base` - Source image (any channel count)
/// * `contours` - Contours to draw
/// * `fill_color` - RGBA interior color
/// * `stroke` - Outline drawn on top; `None` leaves only the fill
pub fn render_filled(
    base: &Raster,
    contours: &[Contour],
    fill_color: [u8; 4],
    stroke: Option<&RenderStyle>,
) -> Raster {
    let mut output = base.to_rgba().into_array();
    let mask = fill_mask(base.width(), base.height(), contours);

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x, y) {
                for c in 0..4 {
                    output[[y, x, c]] = fill_color[c];
                }
            }
        }
    }

    if let Some(style) = stroke {
        for contour in contours {
            stroke_contour(&mut output, contour, style);
        }
    }
    Raster::wrap(output)
}

/// Keep source pixels inside any contour; everything else becomes `[0, 0, 0, 0]`.
pub fn render_mask_extract(base: &Raster, contours: &[Contour]) -> Raster {
    let mut output = base.to_rgba().into_array();
    let mask = fill_mask(base.width(), base.height(), contours);

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !mask.get(x, y) {
                for c in 0..4 {
                    output[[y, x, c]] = 0;
                }
            }
        }
    }
    Raster::wrap(output)
}
