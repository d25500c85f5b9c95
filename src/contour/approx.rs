//! Polygon approximation of traced contours.
//!
//! Traced contours hold every boundary pixel. Two reductions are offered:
//! - **Simple**: drop the inner points of straight runs, keeping run end points
//! - **Douglas-Peucker**: keep only points farther than `epsilon` from the
//!   simplified polyline
//!
//! Both keep the `closed` flag. Closed contours are treated as rings, so the
//! start point is not special for `Simple`.

use serde::{Deserialize, Serialize};

use super::{Contour, Point};
use crate::error::{ContourError, Result};

/// Point reduction applied after tracing and smoothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Approximation {
    /// Keep every traced point.
    #[default]
    None,
    /// Collapse straight runs to their end points.
    Simple,
    /// Douglas-Peucker simplification with a tolerance in pixels.
    DouglasPeucker { epsilon: f32 },
}

impl Approximation {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Approximation::DouglasPeucker { epsilon } if !epsilon.is_finite() || epsilon < 0.0 => {
                Err(ContourError::InvalidConfig(format!(
                    "approximation epsilon must be a non-negative number, got {}",
                    epsilon
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Reduce one contour.
pub fn approximate_contour(contour: &Contour, approximation: Approximation) -> Contour {
    let points = match approximation {
        Approximation::None => return contour.clone(),
        Approximation::Simple => collapse_runs(&contour.points, contour.closed),
        Approximation::DouglasPeucker { epsilon } if contour.closed => {
            douglas_peucker_closed(&contour.points, epsilon)
        }
        Approximation::DouglasPeucker { epsilon } => douglas_peucker(&contour.points, epsilon),
    };
    Contour::new(points, contour.closed)
}

pub fn approximate_contours(contours: &[Contour], approximation: Approximation) -> Vec<Contour> {
    contours
        .iter()
        .map(|c| approximate_contour(c, approximation))
        .collect()
}

// ============================================================================
// Simple
// ============================================================================

/// True when `p` sits inside a straight run: same heading in and out.
fn is_run_interior(prev: Point, p: Point, next: Point) -> bool {
    let (ax, ay) = (p.x as i64 - prev.x as i64, p.y as i64 - prev.y as i64);
    let (bx, by) = (next.x as i64 - p.x as i64, next.y as i64 - p.y as i64);
    ax * by - ay * bx == 0 && ax * bx + ay * by > 0
}

fn collapse_runs(points: &[Point], closed: bool) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let (prev, next) = match (i, closed) {
                (0, false) => return true,
                (i, false) if i == n - 1 => return true,
                (i, _) => (points[(i + n - 1) % n], points[(i + 1) % n]),
            };
            !is_run_interior(prev, points[i], next)
        })
        .map(|i| points[i])
        .collect();

    // A ring where every point is on one straight run cannot exist, but keep
    // the input rather than returning nothing
    if kept.is_empty() {
        points.to_vec()
    } else {
        kept
    }
}

// ============================================================================
// Douglas-Peucker
// ============================================================================

/// Perpendicular distance from `p` to the line through `a` and `b`.
///
/// Falls back to the distance to `a` when `a == b`.
fn distance_to_line(p: Point, a: Point, b: Point) -> f32 {
    let (px, py) = (p.x as f32, p.y as f32);
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (dx, dy) = (b.x as f32 - ax, b.y as f32 - ay);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / len
}

/// Simplify a polyline, keeping both end points.
///
/// # Arguments
/// * `points` - Input polyline points
/// * `epsilon` - Maximum allowed perpendicular distance
///
/// # Returns
/// Simplified polyline with fewer points.
pub fn douglas_peucker(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0f32;
    let mut max_idx = 0;
    for (i, &point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = distance_to_line(point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let mut left = douglas_peucker(&points[..=max_idx], epsilon);
        let right = douglas_peucker(&points[max_idx..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Simplify a ring.
///
/// The ring is split at its first point and the point farthest from it, and
/// each half is simplified as a polyline. The result has no repeated closing
/// point.
pub fn douglas_peucker_closed(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() < 4 {
        return points.to_vec();
    }

    let start = points[0];
    let far = points
        .iter()
        .enumerate()
        .skip(1)
        .fold((0usize, -1.0f32), |best, (i, &p)| {
            let d = distance_to_line(p, start, start);
            if d > best.1 {
                (i, d)
            } else {
                best
            }
        })
        .0;

    let mut ring = points.to_vec();
    ring.push(start);

    let mut simplified = douglas_peucker(&ring[..=far], epsilon);
    simplified.pop();
    simplified.extend(douglas_peucker(&ring[far..], epsilon));
    // Drop the repeated start
    simplified.pop();
    simplified
}
