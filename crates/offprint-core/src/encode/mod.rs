//! Raster encoding: JPEG for lossy pipelines, PNG for the watermark output.

mod jpeg;
mod png;

use crate::error::{Categorized, ErrorCategory};
use thiserror::Error;

pub use jpeg::encode_jpeg;
pub use png::{encode_png, encode_png_rgba};

/// Errors that can occur during raster encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

impl Categorized for EncodeError {
    fn category(&self) -> ErrorCategory {
        match self {
            EncodeError::InvalidPixelData { .. } | EncodeError::InvalidDimensions { .. } => {
                ErrorCategory::InvalidInput
            }
            EncodeError::EncodingFailed(_) => ErrorCategory::ProcessingFailure,
        }
    }
}
