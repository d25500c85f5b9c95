//! WebAssembly exports for contour detection.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat RGBA bytes.
//!
//! ## Contour Buffer
//!
//! Contours come back as one flat `Float32Array`:
//!
//! ```text
//! [count, len_1, closed_1, x, y, x, y, ..., len_2, closed_2, x, y, ...]
//! ```
//!
//! `closed` is 1.0 or 0.0.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::config::DetectConfig;
use crate::contour::Contour;
use crate::error::ContourError;
use crate::pipeline::detect_contours;
use crate::raster::Raster;

fn to_js_err(err: ContourError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Flatten contours into the layout described in the module docs.
pub fn encode_contours(contours: &[Contour]) -> Vec<f32> {
    let total: usize = contours.iter().map(|c| 2 + 2 * c.len()).sum();
    let mut out = Vec::with_capacity(1 + total);
    out.push(contours.len() as f32);
    for contour in contours {
        out.push(contour.len() as f32);
        out.push(if contour.closed { 1.0 } else { 0.0 });
        for p in &contour.points {
            out.push(p.x as f32);
            out.push(p.y as f32);
        }
    }
    out
}

fn rgba_raster(data: &[u8], width: usize, height: usize) -> Result<Raster, JsValue> {
    Raster::from_raw(width, height, 4, data.to_vec()).map_err(to_js_err)
}

// ============================================================================
// Contour Detection
// ============================================================================

/// Detect contours in an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `config_json` - JSON config with camelCase keys; `"{}"` uses the defaults
///
/// # Returns
/// Flat contour buffer
#[wasm_bindgen]
pub fn detect_contours_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    config_json: &str,
) -> Result<Vec<f32>, JsValue> {
    let config = DetectConfig::from_json(config_json).map_err(to_js_err)?;
    let raster = rgba_raster(data, width, height)?;
    let result = detect_contours(&raster, &config).map_err(to_js_err)?;
    Ok(encode_contours(&result.contours))
}

/// Detect contours and return the outline visualization as RGBA bytes.
#[wasm_bindgen]
pub fn contour_overlay_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    config_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let config = DetectConfig::from_json(config_json).map_err(to_js_err)?;
    let raster = rgba_raster(data, width, height)?;
    let result = detect_contours(&raster, &config).map_err(to_js_err)?;
    let overlay: Array3<u8> = result.visualizations.contour_overlay.into_array();
    Ok(overlay.into_raw_vec_and_offset().0)
}

/// Detect contours and return the extracted region as RGBA bytes.
#[wasm_bindgen]
pub fn extract_contours_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    config_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let config = DetectConfig::from_json(config_json).map_err(to_js_err)?;
    let raster = rgba_raster(data, width, height)?;
    let result = detect_contours(&raster, &config).map_err(to_js_err)?;
    Ok(result.visualizations.extracted.to_raw())
}
