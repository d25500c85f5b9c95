//! Filter stages of the contour pipeline.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! [`grayscale`] accepts all three and always returns a single channel.
//! The later stages read luminance from channel 0.
//!
//! ## Stages
//!
//! - **Grayscale**: BT.601 luma, optional min/max normalization
//! - **Blur**: fixed 5x5 Gaussian, clamp-extended border
//! - **Threshold**: fixed or adaptive (mean / Gaussian), dark = foreground
//! - **Edge**: Sobel + non-maximum suppression + hysteresis

pub mod core;
pub mod grayscale;
pub mod blur;
pub mod threshold;
pub mod edge;
