//! Image-to-document assembly.

use super::builder::DocumentBuilder;
use super::page::{
    cap_to_max_edge, fit_page_geometry, named_page_geometry, PageSizeMode, MAX_PAYLOAD_EDGE_PX,
};
use super::PdfError;
use crate::decode::{generate_thumbnail, resize, DecodedImage, FilterType};
use crate::encode::encode_jpeg;
use crate::job::Progress;

/// Display thumbnail bounding box for list entries.
const THUMBNAIL_EDGE_PX: u32 = 160;

/// One source image plus its list thumbnail.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    image: DecodedImage,
    thumbnail: DecodedImage,
}

impl ImageEntry {
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn thumbnail(&self) -> &DecodedImage {
        &self.thumbnail
    }
}

/// The ordered source images behind the image-to-document feature.
/// Reordering uses remove-at-source, insert-at-target semantics.
#[derive(Debug, Clone, Default)]
pub struct ImageOrderList {
    entries: Vec<ImageEntry>,
}

impl ImageOrderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Append an image, generating its thumbnail.
    pub fn add(&mut self, image: DecodedImage) -> Result<(), PdfError> {
        if image.is_empty() {
            return Err(PdfError::EmptyInput);
        }
        let thumbnail = generate_thumbnail(&image, THUMBNAIL_EDGE_PX)?;
        self.entries.push(ImageEntry { image, thumbnail });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<(), PdfError> {
        if index >= self.entries.len() {
            return Err(PdfError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.remove(index);
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), PdfError> {
        let len = self.entries.len();
        if from >= len || to >= len {
            return Err(PdfError::IndexOutOfRange {
                index: from.max(to),
                len,
            });
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Ok(())
    }
}

/// Build a document with one page per listed image, in list order.
///
/// Page geometry always comes from the ORIGINAL pixel dimensions; the pixel
/// payload is independently capped to [`MAX_PAYLOAD_EDGE_PX`] before lossy
/// re-encoding, so compression never changes page size. Any per-image
/// failure aborts the whole run with no partial output.
pub fn assemble<F>(
    list: &ImageOrderList,
    mode: PageSizeMode,
    quality: f64,
    mut progress: F,
) -> Result<Vec<u8>, PdfError>
where
    F: FnMut(Progress),
{
    if list.is_empty() {
        return Err(PdfError::EmptyInput);
    }
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(PdfError::InvalidQuality(quality));
    }
    let jpeg_quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    let total = list.len();

    let mut builder = DocumentBuilder::new();
    for (index, entry) in list.entries().iter().enumerate() {
        let image = entry.image();

        // Geometry from the original dimensions, before any capping.
        let geometry = match mode {
            PageSizeMode::Fit => fit_page_geometry(image.width, image.height),
            named => named_page_geometry(named, image.width, image.height),
        };

        let (cap_w, cap_h) = cap_to_max_edge(image.width, image.height);
        let page_result = (|| -> Result<(), PdfError> {
            let payload = if (cap_w, cap_h) == (image.width, image.height) {
                image.clone()
            } else {
                resize(image, cap_w, cap_h, FilterType::Lanczos3)?
            };
            let jpeg = encode_jpeg(&payload.pixels, payload.width, payload.height, jpeg_quality)?;
            builder.add_image_page(&jpeg, payload.width, payload.height, &geometry)
        })();
        page_result.map_err(|e| PdfError::PageFailed {
            index,
            message: e.to_string(),
        })?;

        progress(Progress {
            completed: index + 1,
            total,
        });
    }

    builder.finish()
}
