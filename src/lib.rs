//! ContourStag
//!
//! Deterministic contour detection for raster images, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Pipeline
//! 1. Grayscale conversion (BT.601 luma, optional normalization)
//! 2. Optional 5x5 Gaussian blur
//! 3. Binarization: fixed threshold, adaptive threshold or Canny edges
//! 4. Moore-neighbor contour tracing
//! 5. Filtering, optional smoothing, optional polygon approximation and rendering
//!
//! ## Image Format
//! Images are `ndarray::Array3<u8>` in (height, width, channels) layout:
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! All visualizations come back as RGBA at the input size.
//!
//! ## Example
//! ```
//! use contourstag::{detect_contours, DetectConfig, Raster};
//!
//! let mut data = vec![255u8; 20 * 20];
//! for y in 5..15 {
//!     for x in 5..15 {
//!         data[y * 20 + x] = 0;
//!     }
//! }
//! let raster = Raster::from_raw(20, 20, 1, data).unwrap();
//! let config = DetectConfig { blur_enabled: false, ..DetectConfig::default() };
//! let result = detect_contours(&raster, &config).unwrap();
//! assert_eq!(result.contours.len(), 1);
//! assert!(result.contours[0].closed);
//! ```

pub mod config;
pub mod contour;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{Binarization, DetectConfig};
pub use contour::{Approximation, Connectivity, Contour, Point};
pub use error::{ContourError, Result};
pub use pipeline::{detect_contours, detect_contours_batch, DetectionResult, DetectionSummary, Visualizations};
pub use raster::{BinaryMask, Raster};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    use crate::config::DetectConfig;
    use crate::contour::Approximation;
    use crate::error::ContourError;
    use crate::pipeline;
    use crate::raster::Raster;

    fn to_py_err(err: ContourError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn parse_approximation(name: &str, epsilon: f32) -> PyResult<Approximation> {
        match name {
            "none" => Ok(Approximation::None),
            "simple" => Ok(Approximation::Simple),
            "douglas_peucker" => Ok(Approximation::DouglasPeucker { epsilon }),
            other => Err(PyValueError::new_err(format!(
                "unknown approximation '{}', expected none, simple or douglas_peucker",
                other
            ))),
        }
    }

    // ========================================================================
    // Contour Detection
    // ========================================================================

    /// Detect contours in a (height, width, channels) u8 image.
    ///
    /// Returns a dict with `contours` (list of `(points, closed)` where points
    /// is a list of `(x, y)`), `count`, `truncated` and the RGBA visualization
    /// arrays `grayscale`, `binary`, `contour_overlay`, `filled`, `extracted`.
    #[pyfunction]
    #[pyo3(signature = (
        image,
        threshold=128,
        use_adaptive=false,
        block_size=21,
        adaptive_c=5,
        use_edge_detection=false,
        high_threshold=50.0,
        low_threshold=20.0,
        blur_enabled=true,
        smoothing_window=None,
        min_contour_points=None,
        approximation="none",
        approximation_epsilon=1.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn detect_contours<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: u8,
        use_adaptive: bool,
        block_size: usize,
        adaptive_c: i32,
        use_edge_detection: bool,
        high_threshold: f32,
        low_threshold: f32,
        blur_enabled: bool,
        smoothing_window: Option<usize>,
        min_contour_points: Option<usize>,
        approximation: &str,
        approximation_epsilon: f32,
    ) -> PyResult<Bound<'py, PyDict>> {
        let config = DetectConfig {
            threshold,
            use_adaptive,
            block_size,
            adaptive_c,
            use_edge_detection,
            high_threshold,
            low_threshold,
            blur_enabled,
            smoothing_window,
            min_contour_points,
            approximation: parse_approximation(approximation, approximation_epsilon)?,
            ..DetectConfig::default()
        };
        let raster = Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)?;

        let result = py
            .allow_threads(|| pipeline::detect_contours(&raster, &config))
            .map_err(to_py_err)?;

        let contours: Vec<(Vec<(u32, u32)>, bool)> = result
            .contours
            .iter()
            .map(|c| (c.points.iter().map(|p| (p.x, p.y)).collect(), c.closed))
            .collect();

        let dict = PyDict::new(py);
        dict.set_item("count", contours.len())?;
        dict.set_item("contours", contours)?;
        dict.set_item("truncated", result.truncated)?;

        let v = result.visualizations;
        dict.set_item("grayscale", v.grayscale.into_array().into_pyarray(py))?;
        dict.set_item("binary", v.binary.into_array().into_pyarray(py))?;
        dict.set_item("contour_overlay", v.contour_overlay.into_array().into_pyarray(py))?;
        dict.set_item("filled", v.filled.into_array().into_pyarray(py))?;
        dict.set_item("extracted", v.extracted.into_array().into_pyarray(py))?;
        Ok(dict)
    }

    /// Detect contours with a JSON config (camelCase keys, all optional).
    ///
    /// Returns the JSON summary `{"contours": [...], "count": n}`.
    #[pyfunction]
    #[pyo3(signature = (image, config_json="{}"))]
    pub fn detect_contours_json<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        config_json: &str,
    ) -> PyResult<String> {
        let config = DetectConfig::from_json(config_json).map_err(to_py_err)?;
        let raster = Raster::from_array(image.as_array().to_owned()).map_err(to_py_err)?;
        let result = py
            .allow_threads(|| pipeline::detect_contours(&raster, &config))
            .map_err(to_py_err)?;
        serde_json::to_string(&result.summary()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    // ========================================================================
    // Module Registration
    // ========================================================================

    #[pymodule]
    pub fn contourstag(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(detect_contours, m)?)?;
        m.add_function(wrap_pyfunction!(detect_contours_json, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::contourstag;
