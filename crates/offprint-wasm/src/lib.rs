//! Offprint WASM - WebAssembly bindings for Offprint
//!
//! This crate exposes the offprint-core media pipelines to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `input` - Upload validation and output-name derivation
//! - `decode` - Image decoding bindings (JPEG, PNG, WebP, resize)
//! - `encode` - Image encoding bindings (JPEG, PNG)
//! - `crop` - The interactive crop session
//! - `watermark` - Watermark rendering
//! - `pdf` - PDF recompression and image-to-PDF assembly
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, CropSession } from '@offprint/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const session = new CropSession(image.width, image.height, 800, 600);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod input;
mod pdf;
mod types;
mod watermark;

// Re-export public types
pub use crop::{apply_crop, CropSession};
pub use decode::{decode_image, generate_thumbnail, resize, resize_to_fit};
pub use encode::{encode_jpeg, encode_png};
pub use input::{
    assembled_name, compressed_name, file_stem, validate_image_upload, validate_pdf_upload,
    watermarked_name,
};
pub use pdf::{recompress_pdf, JsStructuralOutcome, PdfAssembler, PdfPageCompressor};
pub use types::JsDecodedImage;
pub use watermark::render_watermark;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: set up a panic hook for readable errors in the browser
    // console when the console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
