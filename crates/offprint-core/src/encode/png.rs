//! PNG encoding for the watermark output path.
//!
//! The watermark tool always exports lossless PNG so repeated edit/export
//! cycles do not accumulate compression artifacts.

use super::EncodeError;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

/// Encode RGB pixel data to PNG bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    encode_png_inner(pixels, width, height, 3, ExtendedColorType::Rgb8)
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    encode_png_inner(pixels, width, height, 4, ExtendedColorType::Rgba8)
}

fn encode_png_inner(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    color: ExtendedColorType,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * channels;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    encoder
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
