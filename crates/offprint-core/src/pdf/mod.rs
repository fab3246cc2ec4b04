//! PDF output: structural recompression, rasterized recompression, and
//! image-to-document assembly.
//!
//! Page rendering is an external collaborator behind the [`PageRasterizer`]
//! trait; the core never decodes page content itself. Output documents are
//! built with `lopdf` as one DCTDecode image XObject per page.

mod assemble;
mod builder;
mod compress;
mod page;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::error::{Categorized, ErrorCategory};
use thiserror::Error;

pub use assemble::{assemble, ImageOrderList};
pub use builder::DocumentBuilder;
pub use compress::{
    recompress_rasterized, recompress_structural, PageRasterizer, RasterizeOptions,
    StructuralOutcome, TargetDpi,
};
pub use page::{
    cap_to_max_edge, fit_page_geometry, named_page_geometry, rasterized_page_geometry,
    Orientation, PageCompressionJob, PageGeometry, PageSizeMode, MAX_PAYLOAD_EDGE_PX,
    MM_PER_INCH, PAGE_MARGIN_MM, REFERENCE_DPI,
};

/// Errors from the document pipeline.
#[derive(Debug, Error)]
pub enum PdfError {
    /// No pages or images to process
    #[error("Nothing to process: the input is empty")]
    EmptyInput,

    /// Quality factor outside (0, 1]
    #[error("Quality must be in (0, 1], got {0}")]
    InvalidQuality(f64),

    /// Index outside the image list
    #[error("Index {index} out of range for list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The source document could not be parsed
    #[error("Failed to load document: {0}")]
    LoadFailed(String),

    /// Serializing the output document failed
    #[error("Failed to save document: {0}")]
    SaveFailed(String),

    /// The external renderer failed on a page
    #[error("Failed to rasterize page: {0}")]
    RasterizeFailed(String),

    /// A page or image failed mid-run; the whole run is discarded
    #[error("Processing failed on page {index}: {message}")]
    PageFailed { index: usize, message: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl Categorized for PdfError {
    fn category(&self) -> ErrorCategory {
        match self {
            PdfError::EmptyInput
            | PdfError::InvalidQuality(_)
            | PdfError::IndexOutOfRange { .. } => ErrorCategory::InvalidInput,
            PdfError::LoadFailed(_) => ErrorCategory::ConversionFailure,
            PdfError::SaveFailed(_)
            | PdfError::RasterizeFailed(_)
            | PdfError::PageFailed { .. } => ErrorCategory::ProcessingFailure,
            PdfError::Encode(e) => e.category(),
            PdfError::Decode(e) => e.category(),
        }
    }
}
