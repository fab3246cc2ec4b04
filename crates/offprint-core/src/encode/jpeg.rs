//! JPEG encoding for export and PDF page payloads.
//!
//! Uses the `image` crate's JPEG encoder with a configurable quality
//! setting. The document pipeline maps its (0, 1] quality factor onto the
//! 1-100 scale used here.

use super::EncodeError;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    proptest! {
        /// Property: valid input always produces a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 1u8..=100,
        ) {
            let pixels = vec![128u8; (width as usize) * (height as usize) * 3];

            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width as usize) * (height as usize) * 3];

            let a = encode_jpeg(&pixels, width, height, quality).unwrap();
            let b = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: mismatched pixel length is always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            delta in prop_oneof![Just(-1i64), Just(1i64), Just(3i64)],
        ) {
            let expected = (width as i64) * (height as i64) * 3;
            let actual = (expected + delta).max(0) as usize;
            prop_assume!(actual as i64 != expected);

            let pixels = vec![128u8; actual];
            let result = encode_jpeg(&pixels, width, height, 90);
            let rejected = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(rejected, "expected InvalidPixelData for {actual} bytes");
        }
    }
}
