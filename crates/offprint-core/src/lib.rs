//! Offprint Core - Client-side media processing library
//!
//! This crate provides the processing core behind Offprint's two tools: an
//! image watermarking editor with an interactive crop stage, and a PDF
//! compressor / image-to-PDF converter. Everything here is pure computation
//! over bytes and pixels; file pickers, canvases, and page renderers live in
//! the host.

pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod input;
pub mod job;
pub mod pdf;
pub mod watermark;

pub use crop::{apply_crop, CropCommand, CropEditor, DragTarget, Handle, Point};
pub use error::{Categorized, ErrorCategory};
pub use job::{JobGuard, JobLock, Progress};
pub use pdf::{assemble, recompress_rasterized, recompress_structural, ImageOrderList};
pub use watermark::{render_watermark, GlyphSurface, WatermarkSpec};
