//! Upload validation and output-name derivation.
//!
//! Inputs are rejected here before any pipeline state is touched: an
//! unsupported extension or an oversize payload never reaches a decoder.

use crate::error::{Categorized, ErrorCategory};
use thiserror::Error;

/// Maximum accepted image upload, in bytes (50 MiB).
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

/// Maximum accepted PDF upload, in bytes (100 MiB).
pub const MAX_PDF_BYTES: usize = 100 * 1024 * 1024;

/// Image extensions the watermark and assembly tools accept.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Errors raised while validating an upload.
#[derive(Debug, Error)]
pub enum InputError {
    /// The filename has no extension or an unsupported one.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The payload exceeds the accepted size limit.
    #[error("File too large: {actual} bytes (limit {limit})")]
    TooLarge { actual: usize, limit: usize },

    /// The payload is empty.
    #[error("File is empty")]
    Empty,
}

impl Categorized for InputError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidInput
    }
}

/// Lowercased extension of a filename, if any.
fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Filename without its final extension, used as the output-name stem.
pub fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

/// Validate an image upload by extension and size.
pub fn validate_image_upload(filename: &str, byte_len: usize) -> Result<(), InputError> {
    if byte_len == 0 {
        return Err(InputError::Empty);
    }
    if byte_len > MAX_IMAGE_BYTES {
        return Err(InputError::TooLarge {
            actual: byte_len,
            limit: MAX_IMAGE_BYTES,
        });
    }
    match extension(filename) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(InputError::UnsupportedType(filename.to_string())),
    }
}

/// Validate a PDF upload by extension and size.
pub fn validate_pdf_upload(filename: &str, byte_len: usize) -> Result<(), InputError> {
    if byte_len == 0 {
        return Err(InputError::Empty);
    }
    if byte_len > MAX_PDF_BYTES {
        return Err(InputError::TooLarge {
            actual: byte_len,
            limit: MAX_PDF_BYTES,
        });
    }
    match extension(filename) {
        Some(ext) if ext == "pdf" => Ok(()),
        _ => Err(InputError::UnsupportedType(filename.to_string())),
    }
}
