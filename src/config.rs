//! Pipeline configuration.
//!
//! Every field has a default, so `{}` is a valid JSON config. Field names use
//! camelCase on the wire (`useAdaptive`, `blockSize`, ...).

use serde::{Deserialize, Serialize};

use crate::contour::trace::{DEFAULT_MIN_POINTS, DEFAULT_MIN_POINTS_EDGES};
use crate::contour::{Approximation, Connectivity, TraceOptions};
use crate::error::{check_odd_window, ContourError, Result};
use crate::filters::edge::{DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD};
use crate::filters::threshold::AdaptiveMethod;

/// Resolved binarization strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Binarization {
    Fixed { threshold: u8 },
    Adaptive { block_size: usize, c: i32, method: AdaptiveMethod },
    Edges { low: f32, high: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectConfig {
    /// Fixed threshold; pixels at or below it are foreground.
    pub threshold: u8,
    pub use_adaptive: bool,
    /// Adaptive window size, odd and at least 3.
    pub block_size: usize,
    /// Constant subtracted from the local mean.
    pub adaptive_c: i32,
    pub adaptive_method: AdaptiveMethod,
    /// Canny path; takes precedence over `use_adaptive`.
    pub use_edge_detection: bool,
    pub high_threshold: f32,
    pub low_threshold: f32,
    pub blur_enabled: bool,
    /// Min/max contrast stretch after grayscale conversion.
    pub normalize: bool,
    /// Moving-average window, odd and at least 1. `None` disables smoothing.
    pub smoothing_window: Option<usize>,
    /// `None` picks the per-strategy default.
    pub min_contour_points: Option<usize>,
    pub connectivity: Connectivity,
    pub external_only: bool,
    /// Per-contour step cap; `None` uses `4 * width * height + 1`.
    pub max_trace_steps: Option<usize>,
    /// Point reduction after smoothing.
    pub approximation: Approximation,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            use_adaptive: false,
            block_size: 21,
            adaptive_c: 5,
            adaptive_method: AdaptiveMethod::Mean,
            use_edge_detection: false,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            low_threshold: DEFAULT_LOW_THRESHOLD,
            blur_enabled: true,
            normalize: false,
            smoothing_window: None,
            min_contour_points: None,
            connectivity: Connectivity::Eight,
            external_only: false,
            max_trace_steps: None,
            approximation: Approximation::None,
        }
    }
}

impl DetectConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ContourError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter before any pixel is touched.
    pub fn validate(&self) -> Result<()> {
        check_odd_window("block size", self.block_size, 3)?;
        if let Some(window) = self.smoothing_window {
            check_odd_window("smoothing window", window, 1)?;
        }
        for (name, value) in [
            ("high threshold", self.high_threshold),
            ("low threshold", self.low_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ContourError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.max_trace_steps == Some(0) {
            return Err(ContourError::InvalidConfig(
                "max trace steps must be at least 1".to_string(),
            ));
        }
        self.approximation.validate()
    }

    /// Binarization strategy selected by the flags.
    pub fn strategy(&self) -> Binarization {
        if self.use_edge_detection {
            Binarization::Edges {
                low: self.low_threshold,
                high: self.high_threshold,
            }
        } else if self.use_adaptive {
            Binarization::Adaptive {
                block_size: self.block_size,
                c: self.adaptive_c,
                method: self.adaptive_method,
            }
        } else {
            Binarization::Fixed {
                threshold: self.threshold,
            }
        }
    }

    /// Tracer options, with the minimum contour length resolved per strategy.
    pub fn trace_options(&self) -> TraceOptions {
        let default_min = match self.strategy() {
            Binarization::Edges { .. } => DEFAULT_MIN_POINTS_EDGES,
            _ => DEFAULT_MIN_POINTS,
        };
        TraceOptions {
            connectivity: self.connectivity,
            min_points: self.min_contour_points.unwrap_or(default_min),
            max_steps: self.max_trace_steps,
            external_only: self.external_only,
        }
    }
}
