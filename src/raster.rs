//! Raster and binary mask buffers.
//!
//! ## Layout
//!
//! A [`Raster`] wraps an `ndarray::Array3<u8>` of shape `(height, width, channels)`,
//! the same layout every filter in [`crate::filters`] works on:
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! A [`BinaryMask`] is a flat row-major buffer holding only [`FOREGROUND`] or
//! [`BACKGROUND`]. It is what the binarizers produce and the tracer consumes.

use ndarray::{Array3, ArrayView3};

use crate::error::{ContourError, Result};

/// Mask value of a foreground pixel.
pub const FOREGROUND: u8 = 255;
/// Mask value of a background pixel.
pub const BACKGROUND: u8 = 0;

// ============================================================================
// Raster
// ============================================================================

/// Immutable 8-bit image with 1, 3 or 4 channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    data: Array3<u8>,
}

impl Raster {
    /// Build a raster from a flat interleaved buffer.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 1, 3 or 4
    /// * `data` - Row-major interleaved bytes (length = width * height * channels)
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        check_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(ContourError::EmptyImage);
        }
        let len = data.len();
        if len != width * height * channels {
            return Err(ContourError::InvalidDimensions { width, height, channels, len });
        }
        let data = Array3::from_shape_vec((height, width, channels), data).map_err(|_| {
            ContourError::InvalidDimensions { width, height, channels, len }
        })?;
        Ok(Self { data })
    }

    /// Wrap an existing `(height, width, channels)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        check_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(ContourError::EmptyImage);
        }
        Ok(Self { data })
    }

    /// Fill a new raster with one pixel value; `pixel.len()` is the channel count.
    pub fn filled(width: usize, height: usize, pixel: &[u8]) -> Result<Self> {
        let channels = pixel.len();
        Self::from_array(Array3::from_shape_fn((height, width, channels), |(_, _, c)| pixel[c]))
    }

    /// Wrap an array produced by a pipeline stage (shape already checked).
    pub(crate) fn wrap(data: Array3<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Flat row-major interleaved bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Pixel value at `(x, y)`, one byte per channel.
    pub fn pixel(&self, x: usize, y: usize) -> Vec<u8> {
        (0..self.channels()).map(|c| self.data[[y, x, c]]).collect()
    }

    /// Expand to RGBA.
    ///
    /// Grayscale is replicated to R=G=B, RGB gets alpha 255, RGBA is copied.
    pub fn to_rgba(&self) -> Raster {
        let (height, width, channels) = self.data.dim();
        if channels == 4 {
            return self.clone();
        }
        let mut output = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                for c in 0..3 {
                    let src = if channels == 1 { 0 } else { c };
                    output[[y, x, c]] = self.data[[y, x, src]];
                }
                output[[y, x, 3]] = 255;
            }
        }
        Raster { data: output }
    }
}

fn check_channels(channels: usize) -> Result<()> {
    match channels {
        1 | 3 | 4 => Ok(()),
        other => Err(ContourError::UnsupportedChannels(other)),
    }
}

// ============================================================================
// Binary Mask
// ============================================================================

/// Two-valued mask (255 = foreground, 0 = background), row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND; width * height],
        }
    }

    /// Build a mask from raw bytes. Any non-zero byte becomes [`FOREGROUND`].
    ///
    /// A buffer whose length is not `width * height` is rejected.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ContourError::EmptyImage);
        }
        if data.len() != width * height {
            return Err(ContourError::InvalidDimensions {
                width,
                height,
                channels: 1,
                len: data.len(),
            });
        }
        let data = data
            .into_iter()
            .map(|v| if v > 0 { FOREGROUND } else { BACKGROUND })
            .collect();
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] == FOREGROUND
    }

    /// Foreground test that treats out-of-bounds coordinates as background.
    #[inline]
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.data[y as usize * self.width + x as usize] == FOREGROUND
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        self.data[y * self.width + x] = if foreground { FOREGROUND } else { BACKGROUND };
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// RGBA visualization: foreground white, background black, alpha 255.
    pub fn to_rgba(&self) -> Raster {
        let mut output = Array3::<u8>::zeros((self.height, self.width, 4));
        for y in 0..self.height {
            for x in 0..self.width {
                let v = self.data[y * self.width + x];
                output[[y, x, 0]] = v;
                output[[y, x, 1]] = v;
                output[[y, x, 2]] = v;
                output[[y, x, 3]] = 255;
            }
        }
        Raster { data: output }
    }
}
