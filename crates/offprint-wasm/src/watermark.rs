//! Watermark rendering WASM bindings.
//!
//! The spec crosses the boundary as a plain JavaScript object and is
//! deserialized via serde:
//!
//! ```typescript
//! const result = render_watermark(image, fontBytes, {
//!   text: "CONFIDENTIAL",
//!   font_size: 32,
//!   opacity_percent: 40,
//!   rotation_degrees: -30,
//!   color: "#ff0000",
//!   placement: { mode: "tiled", spacing_percent: 120 },
//! });
//! const png = encode_png(result);
//! ```

use crate::types::{js_error, JsDecodedImage};
use offprint_core::watermark::{self, GlyphSurface, WatermarkSpec};
use wasm_bindgen::prelude::*;

/// Render a watermark onto a copy of the image.
///
/// # Arguments
///
/// * `image` - The source image (cropped upstream if a crop was applied)
/// * `font_bytes` - A TTF or OTF font file for glyph rasterization
/// * `spec` - The watermark spec object; see the module docs for the shape
///
/// Whitespace-only text returns the image unchanged. The render is
/// deterministic for a given spec and source image.
#[wasm_bindgen]
pub fn render_watermark(
    image: &JsDecodedImage,
    font_bytes: Vec<u8>,
    spec: JsValue,
) -> Result<JsDecodedImage, JsValue> {
    let spec: WatermarkSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("Invalid watermark spec: {e}")))?;

    // Whitespace-only text is a no-op even when the font bytes are
    // unloadable; the font must not be touched.
    if spec.text.trim().is_empty() {
        return Ok(JsDecodedImage::from_decoded(image.to_decoded()));
    }

    let mut surface = GlyphSurface::new(image.to_decoded(), font_bytes).map_err(js_error)?;
    watermark::render_watermark(&mut surface, &spec).map_err(js_error)?;
    Ok(JsDecodedImage::from_decoded(surface.into_image()))
}
