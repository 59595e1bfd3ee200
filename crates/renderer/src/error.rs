//! Rendering errors.

use fwi_common::FwiError;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Width or height is zero or too large for a raster.
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Pixel buffer does not match the declared dimensions.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Compression or I/O failure while writing PNG data.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] std::io::Error),
}

impl From<RenderError> for FwiError {
    fn from(err: RenderError) -> Self {
        FwiError::RenderError(err.to_string())
    }
}
