//! Contour extraction from binary masks.
//!
//! - **Tracing**: Moore-neighbor boundary following with 4- or 8-connectivity (`trace.rs`)
//! - **Smoothing**: cyclic moving-average over contour points (`smooth.rs`)
//! - **Approximation**: straight-run collapsing and Douglas-Peucker (`approx.rs`)
//! - **Rendering**: outline, filled and mask-extraction visualizations (`render.rs`)

use serde::{Deserialize, Serialize};

pub mod trace;
pub mod smooth;
pub mod approx;
pub mod render;

pub use approx::{approximate_contour, approximate_contours, Approximation};
pub use render::{fill_mask, render_filled, render_mask_extract, render_outline, RenderStyle};
pub use smooth::{smooth_contour, DEFAULT_SMOOTHING_WINDOW};
pub use trace::{trace_contours, Connectivity, TraceOptions, TraceOutcome};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Ordered boundary points; the order is the walk direction of the trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
    /// The trace returned to its starting pixel.
    pub closed: bool,
}

impl Contour {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inclusive bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        let bounds = self.points.iter().fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(bounds)
    }
}
