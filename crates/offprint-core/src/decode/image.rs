//! Decoding of user-supplied image bytes.
//!
//! Supports the formats the upload validator accepts (JPEG, PNG, WebP).
//! All images are flattened to RGB8; transparency is composited over white
//! so downstream JPEG encoding never sees an alpha channel.

use super::{DecodeError, DecodedImage};
use image::DynamicImage;

/// Decode image bytes into an RGB8 [`DecodedImage`].
///
/// The format is sniffed from the byte content, not the filename.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidFormat`] when the bytes are not a
/// recognized image format and [`DecodeError::CorruptedFile`] when the
/// container is recognized but cannot be fully decoded.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    let dynamic = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = flatten_to_rgb(dynamic);
    let img = DecodedImage::from_rgb_image(rgb);
    if img.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(img)
}

/// Flatten any decoded variant to RGB8, compositing alpha over white.
fn flatten_to_rgb(dynamic: DynamicImage) -> image::RgbImage {
    match dynamic {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other if other.color().has_alpha() => {
            let rgba = other.to_rgba8();
            let (width, height) = rgba.dimensions();
            let mut rgb = image::RgbImage::new(width, height);
            for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
                let alpha = src[3] as u16;
                for c in 0..3 {
                    // Composite over a white background.
                    let v = (src[c] as u16 * alpha + 255 * (255 - alpha)) / 255;
                    dst[c] = v as u8;
                }
            }
            rgb
        }
        other => other.to_rgb8(),
    }
}
