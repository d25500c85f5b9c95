//! End-to-end contour detection.
//!
//! ```text
//! raster -> grayscale -> [blur] -> binarize -> trace -> [smooth] -> [approximate] -> render
//! ```
//!
//! Each stage allocates its own output; the input raster is never modified.

use ndarray::ArrayView3;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{Binarization, DetectConfig};
use crate::contour::render::{FILLED_BACKGROUND, HIGHLIGHT_COLOR};
use crate::contour::smooth::smooth_contours;
use crate::contour::{
    approximate_contours, render_filled, render_mask_extract, render_outline, trace_contours,
    Approximation, Contour, RenderStyle,
};
use crate::error::Result;
use crate::filters::blur::gaussian_blur_5x5_u8;
use crate::filters::edge::canny_u8;
use crate::filters::grayscale::{gray_to_rgba, grayscale_u8};
use crate::filters::threshold::{foreground_ratio, threshold_adaptive, threshold_fixed};
use crate::raster::{BinaryMask, Raster};

/// Rendered intermediate and final images, all RGBA at the input size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visualizations {
    /// Luminance before blurring
    pub grayscale: Raster,
    /// Binarized mask, foreground white
    pub binary: Raster,
    /// Contours stroked in green over the input
    pub contour_overlay: Raster,
    /// Contour interiors highlighted and stroked on a near-black canvas
    /// ([`FILLED_BACKGROUND`]), not over the input
    pub filled: Raster,
    /// Input pixels inside contours, transparent elsewhere
    pub extracted: Raster,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionResult {
    pub contours: Vec<Contour>,
    /// Number of traces cut short by the step cap.
    pub truncated: usize,
    pub visualizations: Visualizations,
}

impl DetectionResult {
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            contours: self.contours.clone(),
            count: self.contours.len(),
        }
    }
}

/// JSON-friendly view of a result: `{"contours": [...], "count": n}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetectionSummary {
    pub contours: Vec<Contour>,
    pub count: usize,
}

/// Detect contours in one image.
///
/// # Arguments
/// * `raster` - Input image (grayscale, RGB or RGBA)
/// * `config` - Pipeline parameters, validated before any processing
///
/// # Returns
/// Contours in seed discovery order plus visualizations. Zero contours is a
/// valid result.
pub fn detect_contours(raster: &Raster, config: &DetectConfig) -> Result<DetectionResult> {
    config.validate()?;
    let strategy = config.strategy();
    log::debug!(
        "detect_contours: {}x{}x{} with {:?}",
        raster.width(),
        raster.height(),
        raster.channels(),
        strategy
    );

    let gray = grayscale_u8(raster.view(), config.normalize);
    let blurred = config.blur_enabled.then(|| gaussian_blur_5x5_u8(gray.view()));
    let source = blurred.as_ref().unwrap_or(&gray);

    let mask = binarize(source.view(), strategy)?;
    log::debug!(
        "binarized: {} foreground pixels ({:.1}%)",
        mask.foreground_count(),
        foreground_ratio(&mask) * 100.0
    );

    let outcome = trace_contours(&mask, &config.trace_options());
    let contours = match config.smoothing_window {
        Some(window) => smooth_contours(&outcome.contours, window)?,
        None => outcome.contours,
    };
    let contours = match config.approximation {
        Approximation::None => contours,
        approximation => approximate_contours(&contours, approximation),
    };

    let style = RenderStyle::default();
    let canvas = Raster::filled(raster.width(), raster.height(), &FILLED_BACKGROUND)?;
    let visualizations = Visualizations {
        grayscale: Raster::wrap(gray_to_rgba(gray.view())),
        binary: mask.to_rgba(),
        contour_overlay: render_outline(raster, &contours, &style),
        filled: render_filled(&canvas, &contours, HIGHLIGHT_COLOR, Some(&style)),
        extracted: render_mask_extract(raster, &contours),
    };

    Ok(DetectionResult {
        contours,
        truncated: outcome.truncated,
        visualizations,
    })
}

/// Run [`detect_contours`] over independent images in parallel.
///
/// Results keep the input order. The first failing image's error is returned.
pub fn detect_contours_batch(
    rasters: &[Raster],
    config: &DetectConfig,
) -> Result<Vec<DetectionResult>> {
    config.validate()?;
    rasters
        .par_iter()
        .map(|raster| detect_contours(raster, config))
        .collect()
}

fn binarize(source: ArrayView3<u8>, strategy: Binarization) -> Result<BinaryMask> {
    let mask = match strategy {
        Binarization::Fixed { threshold } => threshold_fixed(source, threshold),
        Binarization::Adaptive { block_size, c, method } => {
            threshold_adaptive(source, block_size, c, method)?
        }
        Binarization::Edges { low, high } => canny_u8(source, low, high),
    };
    Ok(mask)
}
