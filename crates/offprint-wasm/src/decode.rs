//! Image decoding WASM bindings.
//!
//! Exposes the offprint-core decoding pipeline to JavaScript: decoding
//! uploaded image bytes and the resize helpers behind previews and list
//! thumbnails.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@offprint/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = resize_to_fit(image, 2000, 2); // Lanczos3 filter
//! ```

use crate::types::{filter_from_u8, js_error, JsDecodedImage};
use offprint_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image (JPEG, PNG, or WebP) from bytes.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error if the bytes are not a supported format or the file is
/// corrupted or truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Filter type: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Resize an image to fit within a maximum edge length, preserving aspect
/// ratio. Images already within the limit are returned unchanged.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Generate a thumbnail bounded by `size` on the longest edge, for image
/// list entries.
#[wasm_bindgen]
pub fn generate_thumbnail(image: &JsDecodedImage, size: u32) -> Result<JsDecodedImage, JsValue> {
    decode::generate_thumbnail(&image.to_decoded(), size)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(result.is_err());
    }
}
