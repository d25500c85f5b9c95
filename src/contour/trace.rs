//! Boundary tracing over a binary mask.
//!
//! The mask is scanned in row-major order. Every unclaimed foreground pixel
//! that touches the background becomes the seed of a new contour, which is
//! then followed around the region with Moore-neighbor tracing. Every pixel a
//! trace visits is claimed, so one boundary yields one contour. Contours come
//! back in seed discovery order (top-to-bottom, left-to-right).
//!
//! ## Directions
//!
//! Indexed clockwise on screen (y grows downward):
//!
//! ```text
//!   5 6 7
//!   4 . 0
//!   3 2 1
//! ```

use serde::{Deserialize, Serialize};

use super::{render, Contour, Point};
use crate::raster::BinaryMask;

/// Neighbor offsets, clockwise from east.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),   // 0: E
    (1, 1),   // 1: SE
    (0, 1),   // 2: S
    (-1, 1),  // 3: SW
    (-1, 0),  // 4: W
    (-1, -1), // 5: NW
    (0, -1),  // 6: N
    (1, -1),  // 7: NE
];

/// Distinct backtracks a pixel can be visited with, bounding any closing walk.
const MAX_STATES_PER_PIXEL: usize = 4;

/// Minimum contour length kept by default for threshold masks.
pub const DEFAULT_MIN_POINTS: usize = 3;
/// Minimum contour length kept by default for edge masks.
pub const DEFAULT_MIN_POINTS_EDGES: usize = 10;

/// Pixel connectivity of the traced regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Steps along the 4 axis directions only; seeds need a background
    /// pixel among their 8 neighbors.
    Four,
    /// Steps along all 8 directions; seeds need a background pixel among
    /// their 4 axis neighbors.
    #[default]
    Eight,
}

impl Connectivity {
    /// Directions probed by the seed border test.
    fn border_directions(self) -> &'static [usize] {
        match self {
            Connectivity::Eight => &[0, 2, 4, 6],
            Connectivity::Four => &[0, 1, 2, 3, 4, 5, 6, 7],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceOptions {
    pub connectivity: Connectivity,
    /// Contours with fewer points are discarded.
    pub min_points: usize,
    /// Step cap per contour; `None` uses `4 * width * height + 1`, which no
    /// closing walk can reach.
    pub max_steps: Option<usize>,
    /// Drop contours lying entirely inside an earlier kept contour.
    pub external_only: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            min_points: DEFAULT_MIN_POINTS,
            max_steps: None,
            external_only: false,
        }
    }
}

/// Result of tracing one mask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceOutcome {
    pub contours: Vec<Contour>,
    /// Traces cut short by the step cap (kept contours or not).
    pub truncated: usize,
    /// Traces dropped by the minimum point count.
    pub discarded: usize,
}

/// Trace every boundary in the mask.
pub fn trace_contours(mask: &BinaryMask, options: &TraceOptions) -> TraceOutcome {
    let (width, height) = (mask.width(), mask.height());
    let max_steps = options
        .max_steps
        .unwrap_or(MAX_STATES_PER_PIXEL * width * height + 1)
        .max(1);

    let mut tracer = Tracer::new(mask, options.connectivity, max_steps);
    let mut outcome = TraceOutcome::default();

    for y in 0..height {
        for x in 0..width {
            if !mask.get(x, y)
                || tracer.claimed[y * width + x]
                || !is_border(mask, x as i32, y as i32, options.connectivity)
            {
                continue;
            }

            let traced = tracer.trace((x as i32, y as i32));

            if traced.truncated {
                outcome.truncated += 1;
                log::warn!(
                    "trace from ({}, {}) hit the step cap of {}, keeping it open",
                    x,
                    y,
                    max_steps
                );
            }
            if traced.contour.len() < options.min_points {
                outcome.discarded += 1;
                continue;
            }
            outcome.contours.push(traced.contour);
        }
    }

    if options.external_only {
        outcome.contours = retain_external(outcome.contours, width, height);
    }

    log::debug!(
        "traced {} contours ({} discarded, {} truncated)",
        outcome.contours.len(),
        outcome.discarded,
        outcome.truncated
    );
    outcome
}

/// Foreground pixel with at least one background neighbor (out-of-bounds counts).
fn is_border(mask: &BinaryMask, x: i32, y: i32, connectivity: Connectivity) -> bool {
    connectivity.border_directions().iter().any(|&d| {
        let (dx, dy) = DIRECTIONS[d];
        !mask.is_foreground(x + dx, y + dy)
    })
}

struct Traced {
    contour: Contour,
    truncated: bool,
}

/// Tracing state shared by every trace over one mask.
///
/// A trace state is a pixel plus the axis direction of the background pixel
/// the walk keeps on its left (the backtrack). The walk is deterministic in
/// that state, so the first repeated state closes the loop.
struct Tracer<'a> {
    mask: &'a BinaryMask,
    connectivity: Connectivity,
    max_steps: usize,
    /// Pixels visited by any finished trace; seeds must avoid them
    claimed: Vec<bool>,
    /// Per-pixel bitset of backtrack directions seen by the running trace
    seen: Vec<u8>,
}

impl<'a> Tracer<'a> {
    fn new(mask: &'a BinaryMask, connectivity: Connectivity, max_steps: usize) -> Self {
        let len = mask.width() * mask.height();
        Self {
            mask,
            connectivity,
            max_steps,
            claimed: vec![false; len],
            seen: vec![0; len],
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.mask.width() + x as usize
    }

    /// Follow one boundary starting at `seed`.
    ///
    /// The walk may pass through its own pixels again (spurs and one pixel
    /// wide necks are walked out and back). It stops when it is about to
    /// repeat a state, which for a seed found by the row-major scan is the
    /// seed re-entered the same way it was first left.
    fn trace(&mut self, seed: (i32, i32)) -> Traced {
        let (mut x, mut y) = seed;
        let mut back = seed_backtrack(self.mask, seed, self.connectivity);
        let mut points = vec![Point::new(x as u32, y as u32)];
        let mut states = vec![(self.index(x, y), back)];
        self.seen[states[0].0] |= 1 << back;

        let (points, closed, truncated) = loop {
            let Some((nx, ny, next_back)) = self.step(x, y, back) else {
                // Isolated pixel
                break (points, false, false);
            };
            let state = (self.index(nx, ny), next_back);
            if self.seen[state.0] & (1 << next_back) != 0 {
                let pos = states.iter().position(|&s| s == state).unwrap_or(0);
                break (close_loop(points, pos), true, false);
            }
            if points.len() >= self.max_steps {
                break (points, false, true);
            }

            self.seen[state.0] |= 1 << next_back;
            states.push(state);
            points.push(Point::new(nx as u32, ny as u32));
            (x, y, back) = (nx, ny, next_back);
        };

        for &(idx, _) in &states {
            self.seen[idx] = 0;
            self.claimed[idx] = true;
        }
        Traced {
            contour: Contour::new(points, closed),
            truncated,
        }
    }

    /// Next boundary pixel and its backtrack, probing clockwise from `back`.
    fn step(&self, x: i32, y: i32, back: usize) -> Option<(i32, i32, usize)> {
        // 8-connected walks skip the backtrack itself (it is background);
        // 4-connected walks try left, ahead, right, then reverse
        let (first, stride, count) = match self.connectivity {
            Connectivity::Eight => (back + 1, 1, 7),
            Connectivity::Four => (back, 2, 4),
        };

        (0..count)
            .map(|k| (first + k * stride) % 8)
            .find_map(|dir| {
                let (dx, dy) = DIRECTIONS[dir];
                let (nx, ny) = (x + dx, y + dy);
                if !self.mask.is_foreground(nx, ny) {
                    return None;
                }
                // Background probed just before `dir`, seen from the new pixel
                let next_back = match self.connectivity {
                    Connectivity::Eight if dir % 2 == 0 => (dir + 6) % 8,
                    Connectivity::Eight => (dir + 5) % 8,
                    Connectivity::Four => (dir + 6) % 8,
                };
                Some((nx, ny, next_back))
            })
    }
}

/// Cut the loop out of a walk whose next state repeats the state at `pos`.
///
/// When the walk has just stepped back onto the pixel it entered the loop
/// from, that pixel starts the contour and its trailing copy is dropped.
fn close_loop(mut points: Vec<Point>, pos: usize) -> Vec<Point> {
    let last = points.len() - 1;
    if pos > 0 && points[pos - 1] == points[last] {
        points.truncate(last);
        points.drain(..pos - 1);
    } else {
        points.drain(..pos);
    }
    points
}

/// Initial backtrack: the first background neighbor probing clockwise from west.
///
/// Keeping the background on the left of the walk makes outer boundaries run
/// clockwise and hole boundaries counter-clockwise.
fn seed_backtrack(mask: &BinaryMask, seed: (i32, i32), connectivity: Connectivity) -> usize {
    let is_background = |d: usize| {
        let (dx, dy) = DIRECTIONS[d];
        !mask.is_foreground(seed.0 + dx, seed.1 + dy)
    };

    match connectivity {
        Connectivity::Eight => [4, 6, 0, 2].into_iter().find(|&d| is_background(d)).unwrap_or(4),
        Connectivity::Four => (0..8)
            .map(|k| (4 + k) % 8)
            .find(|&d| is_background(d))
            // Round up to the next axis direction
            .map_or(4, |d| (d + d % 2) % 8),
    }
}

/// Keep contours that are not entirely covered by an earlier kept contour.
fn retain_external(contours: Vec<Contour>, width: usize, height: usize) -> Vec<Contour> {
    let mut covered = BinaryMask::new(width, height);
    let mut kept = Vec::with_capacity(contours.len());

    for contour in contours {
        let inside = contour
            .points
            .iter()
            .all(|p| covered.get(p.x as usize, p.y as usize));
        if inside {
            continue;
        }
        render::fill_contour_into(&mut covered, &contour);
        kept.push(contour);
    }

    kept
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Mask with foreground rectangles `(x0, y0, x1, y1)`, half-open.
    fn mask_with_rects(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> BinaryMask {
        let mut mask = BinaryMask::new(width, height);
        for &(x0, y0, x1, y1) in rects {
            for y in y0..y1 {
                for x in x0..x1 {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    fn as_tuples(contour: &Contour) -> Vec<(u32, u32)> {
        contour.points.iter().map(|p| (p.x, p.y)).collect()
    }

    fn occurrences(contour: &Contour, point: (u32, u32)) -> usize {
        contour.points.iter().filter(|p| (p.x, p.y) == point).count()
    }

    /// Every point must be a foreground pixel touching the background.
    fn assert_no_interior_points(contour: &Contour, mask: &BinaryMask) {
        for p in &contour.points {
            assert!(mask.get(p.x as usize, p.y as usize));
            assert!(
                is_border(mask, p.x as i32, p.y as i32, Connectivity::Eight),
                "interior point ({}, {})",
                p.x,
                p.y
            );
        }
    }

    /// Consecutive points (cyclically) are distinct 8-neighbors.
    fn assert_no_repeated_neighbors(contour: &Contour) {
        let n = contour.len();
        for i in 0..n {
            let a = contour.points[i];
            let b = contour.points[(i + 1) % n];
            let (dx, dy) = (a.x.abs_diff(b.x), a.y.abs_diff(b.y));
            assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0), "step {:?} -> {:?}", a, b);
        }
    }

    fn mask_with_disc(size: usize, cx: i32, cy: i32, radius: i32) -> BinaryMask {
        let mut mask = BinaryMask::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let dx = x as i32 - cx;
                let dy = y as i32 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    #[test]
    fn test_empty_mask() {
        let mask = BinaryMask::new(10, 10);
        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert!(outcome.contours.is_empty());
        assert_eq!(outcome.truncated, 0);
    }

    #[test]
    fn test_square_is_one_closed_contour() {
        let mask = mask_with_rects(20, 20, &[(5, 5, 15, 15)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        // Every boundary pixel of a 10x10 square exactly once
        assert_eq!(contour.len(), 36);
        assert_eq!(contour.points[0], Point::new(5, 5));
        assert_eq!(contour.points[1], Point::new(6, 5));
        assert_eq!(
            contour.bounding_box(),
            Some((Point::new(5, 5), Point::new(14, 14)))
        );
    }

    #[test]
    fn test_square_walks_clockwise() {
        let mask = mask_with_rects(8, 8, &[(2, 2, 5, 5)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());
        let points: Vec<(u32, u32)> = outcome.contours[0].points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            points,
            vec![(2, 2), (3, 2), (4, 2), (4, 3), (4, 4), (3, 4), (2, 4), (2, 3)]
        );
    }

    #[test]
    fn test_four_connectivity_square() {
        let mask = mask_with_rects(20, 20, &[(5, 5, 15, 15)]);
        let options = TraceOptions {
            connectivity: Connectivity::Four,
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert_eq!(outcome.contours.len(), 1);
        assert!(outcome.contours[0].closed);
        assert_eq!(outcome.contours[0].len(), 36);
    }

    #[test]
    fn test_disc_is_one_closed_contour() {
        let mask = mask_with_disc(31, 15, 15, 8);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        // Perimeter of an 8-connected digital circle is roughly 2*pi*r*0.9..1.2
        assert!((40..=64).contains(&contour.len()), "len {}", contour.len());
        for p in &contour.points {
            let dx = p.x as i32 - 15;
            let dy = p.y as i32 - 15;
            let d2 = dx * dx + dy * dy;
            assert!(d2 <= 64 && d2 >= 36, "point ({}, {}) off the rim", p.x, p.y);
        }
    }

    #[test]
    fn test_seed_order_upper_blob_first() {
        // Lower blob sits further left so a column-major scan would flip the order
        let mask = mask_with_rects(30, 30, &[(15, 2, 25, 8), (2, 15, 10, 25)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 2);
        assert_eq!(outcome.contours[0].points[0], Point::new(15, 2));
        assert_eq!(outcome.contours[1].points[0], Point::new(2, 15));
    }

    #[test]
    fn test_small_blob_filtered() {
        let mask = mask_with_rects(10, 10, &[(4, 4, 6, 6)]);
        let options = TraceOptions {
            min_points: 20,
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert!(outcome.contours.is_empty());
        assert_eq!(outcome.discarded, 1);

        // Default minimum keeps the 4-point loop
        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert_eq!(outcome.contours.len(), 1);
        assert_eq!(outcome.contours[0].len(), 4);
        assert!(outcome.contours[0].closed);
    }

    #[test]
    fn test_single_pixel_island_terminates() {
        let mask = mask_with_rects(5, 5, &[(2, 2, 3, 3)]);

        let options = TraceOptions {
            min_points: 1,
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert_eq!(outcome.contours.len(), 1);
        assert_eq!(outcome.contours[0].points, vec![Point::new(2, 2)]);
        assert!(!outcome.contours[0].closed);

        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert!(outcome.contours.is_empty());
        assert_eq!(outcome.discarded, 1);
    }

    #[test]
    fn test_thin_line_walks_out_and_back() {
        let mask = mask_with_rects(10, 5, &[(1, 2, 6, 3)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        assert_eq!(
            as_tuples(contour),
            vec![(1, 2), (2, 2), (3, 2), (4, 2), (5, 2), (4, 2), (3, 2), (2, 2)]
        );
    }

    #[test]
    fn test_four_connectivity_thin_line() {
        let mask = mask_with_rects(10, 5, &[(1, 2, 6, 3)]);
        let options = TraceOptions {
            connectivity: Connectivity::Four,
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert_eq!(outcome.contours.len(), 1);
        assert!(outcome.contours[0].closed);
        assert_eq!(outcome.contours[0].len(), 8);
        assert_eq!(outcome.contours[0].points[0], Point::new(1, 2));
    }

    #[test]
    fn test_two_pixel_blobs_close() {
        let mask = mask_with_rects(8, 8, &[(2, 2, 4, 3)]);
        let outcome = trace_contours(&mask, &TraceOptions { min_points: 1, ..TraceOptions::default() });
        assert_eq!(as_tuples(&outcome.contours[0]), vec![(2, 2), (3, 2)]);
        assert!(outcome.contours[0].closed);

        let mut mask = BinaryMask::new(8, 8);
        mask.set(2, 2, true);
        mask.set(3, 3, true);
        let outcome = trace_contours(&mask, &TraceOptions { min_points: 1, ..TraceOptions::default() });
        assert_eq!(outcome.contours.len(), 1);
        assert_eq!(as_tuples(&outcome.contours[0]), vec![(2, 2), (3, 3)]);
        assert!(outcome.contours[0].closed);
    }

    #[test]
    fn test_full_mask_traces_image_frame() {
        let mask = mask_with_rects(6, 4, &[(0, 0, 6, 4)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert_eq!(outcome.contours.len(), 1);
        assert!(outcome.contours[0].closed);
        assert_eq!(outcome.contours[0].len(), 2 * 6 + 2 * 4 - 4);
    }

    #[test]
    fn test_step_cap_truncates() {
        let mask = mask_with_rects(20, 20, &[(5, 5, 15, 15)]);
        let options = TraceOptions {
            max_steps: Some(10),
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);

        // Each capped trace claims what it walked, so later seeds pick up the rest
        assert!(outcome.truncated >= 1);
        assert_eq!(outcome.contours[0].points[0], Point::new(5, 5));
        assert_eq!(outcome.contours[0].len(), 10);
        assert!(!outcome.contours[0].closed);
        assert!(outcome.contours.iter().all(|c| c.len() <= 10));
    }

    #[test]
    fn test_contour_of_exactly_cap_length_still_closes() {
        let mask = mask_with_rects(8, 8, &[(2, 2, 5, 5)]);
        let options = TraceOptions {
            max_steps: Some(8),
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert_eq!(outcome.truncated, 0);
        assert_eq!(outcome.contours.len(), 1);
        assert!(outcome.contours[0].closed);
    }

    #[test]
    fn test_hole_gets_its_own_contour() {
        // 12x12 block with a 4x4 hole
        let mut mask = mask_with_rects(20, 20, &[(4, 4, 16, 16)]);
        for y in 8..12 {
            for x in 8..12 {
                mask.set(x, y, false);
            }
        }
        let outcome = trace_contours(&mask, &TraceOptions::default());
        assert_eq!(outcome.contours.len(), 2);
        assert!(outcome.contours.iter().all(|c| c.closed));
        assert_eq!(outcome.contours[0].points[0], Point::new(4, 4));
        // Hole boundary starts above the hole's top-left corner
        assert_eq!(outcome.contours[1].points[0], Point::new(8, 7));

        let options = TraceOptions {
            external_only: true,
            ..TraceOptions::default()
        };
        let outcome = trace_contours(&mask, &options);
        assert_eq!(outcome.contours.len(), 1);
        assert_eq!(outcome.contours[0].points[0], Point::new(4, 4));
    }

    #[test]
    fn test_hole_and_outer_contours_are_disjoint() {
        let mut mask = mask_with_rects(20, 20, &[(4, 4, 16, 16)]);
        for y in 8..12 {
            for x in 8..12 {
                mask.set(x, y, false);
            }
        }
        let outcome = trace_contours(&mask, &TraceOptions::default());
        let outer: HashSet<(u32, u32)> = as_tuples(&outcome.contours[0]).into_iter().collect();
        let hole: HashSet<(u32, u32)> = as_tuples(&outcome.contours[1]).into_iter().collect();
        assert!(outer.is_disjoint(&hole));
        // Pixels 4-adjacent to the 4x4 hole
        assert_eq!(outcome.contours[1].len(), 16);
        assert!(hole.iter().all(|&(x, y)| (7..=12).contains(&x) && (7..=12).contains(&y)));
    }

    #[test]
    fn test_spur_is_part_of_one_contour() {
        // 6x6 square with a 3 pixel spur sticking up from its top row
        let mask = mask_with_rects(12, 12, &[(2, 4, 8, 10), (5, 1, 6, 4)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        assert_eq!(contour.len(), 24);
        assert_eq!(contour.points[0], Point::new(5, 1));
        assert_no_interior_points(contour, &mask);
        assert_no_repeated_neighbors(contour);

        // Walked up once and down once, the tip only once
        assert_eq!(occurrences(contour, (5, 1)), 1);
        assert_eq!(occurrences(contour, (5, 2)), 2);
        assert_eq!(occurrences(contour, (5, 3)), 2);
    }

    #[test]
    fn test_dumbbell_neck_is_walked_both_ways() {
        // Two 5x5 blocks joined by a 3 pixel neck
        let mask = mask_with_rects(16, 8, &[(1, 1, 6, 6), (9, 1, 14, 6), (6, 3, 9, 4)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        // 15 boundary pixels per block plus the neck twice
        assert_eq!(contour.len(), 36);
        assert_no_interior_points(contour, &mask);
        assert_no_repeated_neighbors(contour);
        for x in 6..9 {
            assert_eq!(occurrences(contour, (x, 3)), 2);
        }
        // Pixels where the neck joins the blocks are interior
        assert_eq!(occurrences(contour, (5, 3)), 0);
        assert_eq!(occurrences(contour, (9, 3)), 0);
    }

    #[test]
    fn test_lollipop_is_one_closed_contour() {
        // 20x20 square with a 10 pixel stick out of its right side
        let mask = mask_with_rects(60, 60, &[(10, 10, 30, 30), (30, 20, 40, 21)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        assert_eq!(outcome.discarded, 0);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        // 75 square boundary pixels, 10 out along the stick, 9 back
        assert_eq!(contour.len(), 94);
        assert_no_interior_points(contour, &mask);
        assert_no_repeated_neighbors(contour);
        assert_eq!(occurrences(contour, (39, 20)), 1);
        assert_eq!(
            contour.bounding_box(),
            Some((Point::new(10, 10), Point::new(39, 29)))
        );
    }

    #[test]
    fn test_thick_spur_needs_no_revisit() {
        // A two pixel wide arm has distinct upper and lower edges
        let mask = mask_with_rects(40, 30, &[(5, 5, 20, 20), (20, 10, 32, 12)]);
        let outcome = trace_contours(&mask, &TraceOptions::default());

        assert_eq!(outcome.contours.len(), 1);
        let contour = &outcome.contours[0];
        assert!(contour.closed);
        assert_no_interior_points(contour, &mask);
        let unique: HashSet<(u32, u32)> = as_tuples(contour).into_iter().collect();
        assert_eq!(unique.len(), contour.len());
        // Square ring of 56 minus the two pixels hidden behind the arm, plus 24 arm pixels
        assert_eq!(contour.len(), 56 - 2 + 24);
    }

    #[test]
    fn test_trace_is_deterministic() {
        let mask = mask_with_disc(40, 20, 18, 11);
        let a = trace_contours(&mask, &TraceOptions::default());
        let b = trace_contours(&mask, &TraceOptions::default());
        assert_eq!(a, b);
    }
}
