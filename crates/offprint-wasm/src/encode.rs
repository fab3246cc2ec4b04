//! Raster encoding WASM bindings.
//!
//! JPEG for the document pipelines, PNG for the watermark download.

use crate::types::{js_error, JsDecodedImage};
use offprint_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image as JPEG.
///
/// # Arguments
///
/// * `image` - The source image (RGB pixels)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes as a `Uint8Array`.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let decoded = image.to_decoded();
    encode::encode_jpeg(&decoded.pixels, decoded.width, decoded.height, quality)
        .map_err(js_error)
}

/// Encode an image as PNG (lossless, used for the watermarked output).
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let decoded = image.to_decoded();
    encode::encode_png(&decoded.pixels, decoded.width, decoded.height).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32) -> JsDecodedImage {
        JsDecodedImage::new(width, height, vec![120u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_encode_jpeg_produces_jfif_bytes() {
        let bytes = encode_jpeg(&solid_image(32, 32), 80).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_png_produces_png_signature() {
        let bytes = encode_png(&solid_image(16, 16)).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_rejects_zero_dimensions() {
        let img = JsDecodedImage::new(0, 0, Vec::new());
        assert!(encode_jpeg(&img, 80).is_err());
    }
}
