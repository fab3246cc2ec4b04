//! Output document construction with `lopdf`.

use super::page::{PageGeometry, MM_PER_INCH};
use super::PdfError;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

const POINTS_PER_INCH: f64 = 72.0;

fn mm_to_points(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Builds a document of image pages: one JPEG payload per page, placed by a
/// [`PageGeometry`].
pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        // Reserved up front so pages can reference their parent.
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append one page holding a single JPEG image XObject.
    ///
    /// `px_width`/`px_height` are the payload's pixel dimensions (already
    /// capped by the caller); the physical placement comes entirely from
    /// `geometry`.
    pub fn add_image_page(
        &mut self,
        jpeg: &[u8],
        px_width: u32,
        px_height: u32,
        geometry: &PageGeometry,
    ) -> Result<(), PdfError> {
        if jpeg.is_empty() || px_width == 0 || px_height == 0 {
            return Err(PdfError::EmptyInput);
        }

        let image_id = self.doc.add_object(Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(px_width),
                "Height" => i64::from(px_height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg.to_vec(),
        )));

        let name = format!("Im{}", self.page_ids.len());

        let page_w = mm_to_points(geometry.page_width_mm);
        let page_h = mm_to_points(geometry.page_height_mm);
        let img_w = mm_to_points(geometry.image_width_mm);
        let img_h = mm_to_points(geometry.image_height_mm);
        let img_x = mm_to_points(geometry.image_x_mm);
        // Geometry is top-left based; PDF user space starts bottom-left.
        let img_y = page_h - mm_to_points(geometry.image_y_mm) - img_h;

        let content = format!("q {img_w:.2} 0 0 {img_h:.2} {img_x:.2} {img_y:.2} cm /{name} Do Q");
        let content_id = self
            .doc
            .add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                content.into_bytes(),
            )));

        let mut xobjects = Dictionary::new();
        xobjects.set(name, Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(self.pages_id),
            "MediaBox" => Object::Array(vec![
                0.into(),
                0.into(),
                Object::Real(page_w as f32),
                Object::Real(page_h as f32),
            ]),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Dictionary(resources),
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Wire up the page tree and catalog, compact streams, and serialize.
    pub fn finish(mut self) -> Result<Vec<u8>, PdfError> {
        if self.page_ids.is_empty() {
            return Err(PdfError::EmptyInput);
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => self.page_ids.len() as i64,
                "Kids" => kids,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        });
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveFailed(e.to_string()))?;
        Ok(buffer)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
