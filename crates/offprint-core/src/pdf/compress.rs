//! Document recompression: structural and rasterized.

use super::builder::DocumentBuilder;
use super::page::{rasterized_page_geometry, PageCompressionJob, REFERENCE_DPI};
use super::PdfError;
use crate::decode::DecodedImage;
use crate::encode::encode_jpeg;
use crate::job::Progress;
use lopdf::Document;

/// Result of a structural pass. An output larger than the input is a
/// reported outcome the caller can surface as a hint, never an error.
#[derive(Debug, Clone)]
pub struct StructuralOutcome {
    pub bytes: Vec<u8>,
    pub input_len: usize,
    pub output_len: usize,
}

impl StructuralOutcome {
    pub fn size_increased(&self) -> bool {
        self.output_len > self.input_len
    }
}

/// Re-encode the document with stream-level compaction, no pixel changes.
pub fn recompress_structural(bytes: &[u8]) -> Result<StructuralOutcome, PdfError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| PdfError::LoadFailed(e.to_string()))?;
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PdfError::SaveFailed(e.to_string()))?;

    Ok(StructuralOutcome {
        input_len: bytes.len(),
        output_len: output.len(),
        bytes: output,
    })
}

/// The fixed set of target densities for rasterized recompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDpi {
    Dpi72,
    Dpi96,
    Dpi150,
    Dpi200,
    Dpi300,
}

impl TargetDpi {
    pub fn value(self) -> f64 {
        match self {
            TargetDpi::Dpi72 => 72.0,
            TargetDpi::Dpi96 => 96.0,
            TargetDpi::Dpi150 => 150.0,
            TargetDpi::Dpi200 => 200.0,
            TargetDpi::Dpi300 => 300.0,
        }
    }

    pub fn from_value(dpi: u32) -> Option<Self> {
        match dpi {
            72 => Some(TargetDpi::Dpi72),
            96 => Some(TargetDpi::Dpi96),
            150 => Some(TargetDpi::Dpi150),
            200 => Some(TargetDpi::Dpi200),
            300 => Some(TargetDpi::Dpi300),
            _ => None,
        }
    }
}

/// The external page renderer. In the browser this is backed by pdf.js;
/// tests use synthetic rasters.
pub trait PageRasterizer {
    fn page_count(&self) -> usize;
    /// Render one page at the given scale relative to its natural size.
    fn rasterize(&mut self, index: usize, scale: f64) -> Result<DecodedImage, PdfError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RasterizeOptions {
    pub target_dpi: TargetDpi,
    /// Lossy re-encode quality factor in (0, 1].
    pub quality: f64,
}

/// Re-encode a document page by page as full-bleed JPEG rasters.
///
/// Pages are processed strictly sequentially in document order, with the
/// progress observer invoked after each page. Any per-page failure aborts
/// the whole run; no partial document is ever returned.
pub fn recompress_rasterized<R, F>(
    rasterizer: &mut R,
    options: &RasterizeOptions,
    mut progress: F,
) -> Result<Vec<u8>, PdfError>
where
    R: PageRasterizer,
    F: FnMut(Progress),
{
    if !(options.quality > 0.0 && options.quality <= 1.0) {
        return Err(PdfError::InvalidQuality(options.quality));
    }
    let total = rasterizer.page_count();
    if total == 0 {
        return Err(PdfError::EmptyInput);
    }

    let dpi = options.target_dpi.value();
    let scale = dpi / REFERENCE_DPI;
    let quality = (options.quality * 100.0).round().clamp(1.0, 100.0) as u8;

    let mut builder = DocumentBuilder::new();
    for index in 0..total {
        let page = rasterizer
            .rasterize(index, scale)
            .map_err(|e| PdfError::PageFailed {
                index,
                message: e.to_string(),
            })?;

        let job = PageCompressionJob {
            index,
            scale,
            quality: options.quality,
            geometry: rasterized_page_geometry(page.width, page.height, dpi),
        };

        let jpeg = encode_jpeg(&page.pixels, page.width, page.height, quality).map_err(|e| {
            PdfError::PageFailed {
                index,
                message: e.to_string(),
            }
        })?;
        builder.add_image_page(&jpeg, page.width, page.height, &job.geometry)?;

        progress(Progress {
            completed: index + 1,
            total,
        });
    }

    builder.finish()
}
