//! Error type shared by every pipeline stage.

/// Errors returned before any processing starts.
///
/// Finding zero contours is not an error, and neither is a trace that hits the
/// step cap (see [`crate::pipeline::DetectionResult::truncated`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContourError {
    /// Width or height is zero.
    #[error("image is empty")]
    EmptyImage,

    /// Buffer length does not match `width * height * channels`.
    #[error("invalid dimensions: {len} bytes do not match {width}x{height}x{channels}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },

    /// Only 1, 3 or 4 channels are supported.
    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    /// A window parameter (block size, smoothing window) is even or too small.
    #[error("invalid {name}: {value} (must be odd and >= {min})")]
    InvalidWindow {
        name: &'static str,
        value: usize,
        min: usize,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ContourError>;

/// Check that `value` is odd and at least `min`.
pub(crate) fn check_odd_window(name: &'static str, value: usize, min: usize) -> Result<()> {
    if value < min || value % 2 == 0 {
        return Err(ContourError::InvalidWindow { name, value, min });
    }
    Ok(())
}
