//! Upload validation and output-name bindings.
//!
//! These run before any bytes cross into a pipeline, so a bad upload is
//! rejected without allocating a decode buffer.

use crate::types::js_error;
use offprint_core::input;
use offprint_core::job;
use wasm_bindgen::prelude::*;

/// Validate an image upload by filename extension and size.
///
/// Accepts jpg, jpeg, png, and webp up to 50 MiB.
#[wasm_bindgen]
pub fn validate_image_upload(filename: &str, byte_len: usize) -> Result<(), JsValue> {
    input::validate_image_upload(filename, byte_len).map_err(js_error)
}

/// Validate a PDF upload by filename extension and size (up to 100 MiB).
#[wasm_bindgen]
pub fn validate_pdf_upload(filename: &str, byte_len: usize) -> Result<(), JsValue> {
    input::validate_pdf_upload(filename, byte_len).map_err(js_error)
}

/// Filename without its final extension, used as the output-name stem.
#[wasm_bindgen]
pub fn file_stem(filename: &str) -> String {
    input::file_stem(filename).to_string()
}

/// `<stem>_watermarked.png`
#[wasm_bindgen]
pub fn watermarked_name(stem: &str) -> String {
    job::watermarked_name(stem)
}

/// `<stem>_compressed.pdf`
#[wasm_bindgen]
pub fn compressed_name(stem: &str) -> String {
    job::compressed_name(stem)
}

/// `images_to_pdf_<timestamp>.pdf`. Pass `Date.now()`.
#[wasm_bindgen]
pub fn assembled_name(timestamp_ms: f64) -> String {
    job::assembled_name(timestamp_ms.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_accepts_supported_types() {
        for name in ["photo.jpg", "scan.PNG", "pic.webp"] {
            assert!(validate_image_upload(name, 1024).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_output_names() {
        assert_eq!(file_stem("holiday.webp"), "holiday");
        assert_eq!(watermarked_name("holiday"), "holiday_watermarked.png");
        assert_eq!(compressed_name("report"), "report_compressed.pdf");
        assert_eq!(assembled_name(1724371200000.0), "images_to_pdf_1724371200000.pdf");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_validate_rejects_unsupported_type() {
        assert!(validate_image_upload("archive.zip", 1024).is_err());
        assert!(validate_pdf_upload("notes.txt", 1024).is_err());
    }
}
