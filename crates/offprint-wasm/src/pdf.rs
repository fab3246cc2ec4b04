//! PDF WASM bindings: structural recompression, rasterized recompression,
//! and image-to-PDF assembly.
//!
//! Page rendering stays in JavaScript (pdf.js); the rasterized path is fed
//! pre-rendered page pixels through [`PdfPageCompressor`]. Assembly and
//! compression run one job at a time per object; a second start while a job
//! runs is rejected, never queued.

use crate::types::{js_error, JsDecodedImage};
use offprint_core::decode::DecodedImage;
use offprint_core::job::{JobLock, Progress};
use offprint_core::pdf::{
    self, ImageOrderList, PageRasterizer, PageSizeMode, PdfError, RasterizeOptions,
    StructuralOutcome, TargetDpi, REFERENCE_DPI,
};
use wasm_bindgen::prelude::*;

/// Report `{ completed, total }` to an optional JS observer.
fn report_progress(observer: &Option<js_sys::Function>, progress: Progress) {
    if let Some(f) = observer {
        let _ = f.call2(
            &JsValue::NULL,
            &JsValue::from(progress.completed as u32),
            &JsValue::from(progress.total as u32),
        );
    }
}

/// Result of a structural recompression pass.
///
/// An output larger than the input is a reported outcome, not an error;
/// check `size_increased` to decide whether to offer the rasterized path
/// instead.
#[wasm_bindgen]
pub struct JsStructuralOutcome {
    inner: StructuralOutcome,
}

#[wasm_bindgen]
impl JsStructuralOutcome {
    /// The recompressed document bytes as a `Uint8Array`.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Size of the input document in bytes.
    #[wasm_bindgen(getter)]
    pub fn input_len(&self) -> usize {
        self.inner.input_len
    }

    /// Size of the output document in bytes.
    #[wasm_bindgen(getter)]
    pub fn output_len(&self) -> usize {
        self.inner.output_len
    }

    /// True when the pass made the document larger.
    #[wasm_bindgen(getter)]
    pub fn size_increased(&self) -> bool {
        self.inner.size_increased()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

/// Re-encode a PDF with stream-level compaction, no pixel changes.
#[wasm_bindgen]
pub fn recompress_pdf(bytes: &[u8]) -> Result<JsStructuralOutcome, JsValue> {
    pdf::recompress_structural(bytes)
        .map(|inner| JsStructuralOutcome { inner })
        .map_err(js_error)
}

/// Pre-rendered pages held for one rasterized recompression run.
struct CollectedPages<'a> {
    pages: &'a [DecodedImage],
}

impl PageRasterizer for CollectedPages<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rasterize(&mut self, index: usize, _scale: f64) -> Result<DecodedImage, PdfError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| PdfError::RasterizeFailed(format!("no rendered page {index}")))
    }
}

/// Rasterized PDF recompression fed by an external page renderer.
///
/// The caller renders every page at `render_scale` (pdf.js viewport scale),
/// adds the rasters in document order, then calls `compress`.
///
/// ```typescript
/// const compressor = new PdfPageCompressor(150, 0.7);
/// for (let i = 1; i <= pdf.numPages; i++) {
///   const page = await pdf.getPage(i);
///   const raster = renderToRgb(page, compressor.render_scale);
///   compressor.add_page(raster);
/// }
/// const bytes = compressor.compress((done, total) => updateBar(done, total));
/// ```
#[wasm_bindgen]
pub struct PdfPageCompressor {
    pages: Vec<DecodedImage>,
    options: RasterizeOptions,
    lock: JobLock,
}

#[wasm_bindgen]
impl PdfPageCompressor {
    /// Create a compressor targeting one of the supported densities
    /// (72, 96, 150, 200, or 300 DPI) at a quality factor in (0, 1].
    #[wasm_bindgen(constructor)]
    pub fn new(target_dpi: u32, quality: f64) -> Result<PdfPageCompressor, JsValue> {
        let target_dpi = TargetDpi::from_value(target_dpi)
            .ok_or_else(|| JsValue::from_str(&format!("Unsupported target DPI: {target_dpi}")))?;
        Ok(PdfPageCompressor {
            pages: Vec::new(),
            options: RasterizeOptions {
                target_dpi,
                quality,
            },
            lock: JobLock::new(),
        })
    }

    /// The scale the renderer must apply to each page's natural size.
    #[wasm_bindgen(getter)]
    pub fn render_scale(&self) -> f64 {
        self.options.target_dpi.value() / REFERENCE_DPI
    }

    /// Number of pages added so far.
    #[wasm_bindgen(getter)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one rendered page, in document order.
    pub fn add_page(&mut self, page: &JsDecodedImage) {
        self.pages.push(page.to_decoded());
    }

    /// Re-encode the collected pages as a full-bleed JPEG-per-page PDF.
    ///
    /// `on_progress` is called with `(completed, total)` after each page.
    /// Any page failure aborts the run with no partial output, and a
    /// re-entrant call while a run is live is rejected.
    pub fn compress(&self, on_progress: Option<js_sys::Function>) -> Result<Vec<u8>, JsValue> {
        let _guard = self.lock.acquire().map_err(js_error)?;
        let mut rasterizer = CollectedPages { pages: &self.pages };
        pdf::recompress_rasterized(&mut rasterizer, &self.options, |p| {
            report_progress(&on_progress, p);
        })
        .map_err(js_error)
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

/// Ordered image list and assembly for the image-to-PDF tool.
///
/// Images keep their insertion order until `remove` or `reorder` changes
/// it; `assemble` emits one page per image in list order.
#[wasm_bindgen]
pub struct PdfAssembler {
    list: ImageOrderList,
    lock: JobLock,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PdfAssembler {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PdfAssembler {
        PdfAssembler {
            list: ImageOrderList::new(),
            lock: JobLock::new(),
        }
    }

    /// Number of images in the list.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append an image to the list, generating its list thumbnail.
    pub fn add_image(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        self.list.add(image.to_decoded()).map_err(js_error)
    }

    /// Remove the image at `index`.
    pub fn remove(&mut self, index: usize) -> Result<(), JsValue> {
        self.list.remove(index).map_err(js_error)
    }

    /// Move the image at `from` to position `to` (remove, then insert).
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.list.reorder(from, to).map_err(js_error)
    }

    /// The list thumbnail for the image at `index`, bounded to 160 px.
    pub fn thumbnail(&self, index: usize) -> Result<JsDecodedImage, JsValue> {
        let entry = self.list.entries().get(index).ok_or_else(|| {
            js_error(PdfError::IndexOutOfRange {
                index,
                len: self.list.len(),
            })
        })?;
        Ok(JsDecodedImage::from_decoded(entry.thumbnail().clone()))
    }

    /// Build a PDF with one page per image, in list order.
    ///
    /// `mode` is `"fit"`, `"a4"`, `"letter"`, or `"legal"`; `quality` is the
    /// JPEG quality factor in (0, 1]. `on_progress` is called with
    /// `(completed, total)` between images. Any per-image failure aborts
    /// the run, and a re-entrant call while a run is live is rejected.
    pub fn assemble(
        &self,
        mode: JsValue,
        quality: f64,
        on_progress: Option<js_sys::Function>,
    ) -> Result<Vec<u8>, JsValue> {
        let mode: PageSizeMode = serde_wasm_bindgen::from_value(mode)
            .map_err(|e| JsValue::from_str(&format!("Invalid page size mode: {e}")))?;
        let _guard = self.lock.acquire().map_err(js_error)?;
        pdf::assemble(&self.list, mode, quality, |p| {
            report_progress(&on_progress, p);
        })
        .map_err(js_error)
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}
