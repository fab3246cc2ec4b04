//! Physical page geometry.
//!
//! All page math happens in millimeters; the builder converts to PDF points
//! only at serialization. Page geometry is always computed from the source
//! image's ORIGINAL pixel dimensions; the pixel payload is capped separately
//! (see [`cap_to_max_edge`]) so that compression never changes page size.

use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;

/// The pixel density assumed when converting source pixels to physical size.
pub const REFERENCE_DPI: f64 = 96.0;

/// Margin inside named page sizes.
pub const PAGE_MARGIN_MM: f64 = 10.0;

/// Per-edge cap on the compressed pixel payload.
pub const MAX_PAYLOAD_EDGE_PX: u32 = 2000;

const A4_MM: (f64, f64) = (210.0, 297.0);
const LETTER_MM: (f64, f64) = (215.9, 279.4);
const LEGAL_MM: (f64, f64) = (215.9, 355.6);

/// How output pages are sized during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizeMode {
    /// Page sized exactly to the source image at the reference DPI.
    Fit,
    A4,
    Letter,
    Legal,
}

impl PageSizeMode {
    /// Portrait dimensions of a named size in millimeters.
    fn named_size_mm(self) -> Option<(f64, f64)> {
        match self {
            PageSizeMode::Fit => None,
            PageSizeMode::A4 => Some(A4_MM),
            PageSizeMode::Letter => Some(LETTER_MM),
            PageSizeMode::Legal => Some(LEGAL_MM),
        }
    }
}

/// Derived from physical dimensions only, never from source metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn of(width_mm: f64, height_mm: f64) -> Self {
        if width_mm > height_mm {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// One output page: its physical size and where the image payload lands.
/// Image coordinates are from the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub image_x_mm: f64,
    pub image_y_mm: f64,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
}

impl PageGeometry {
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.page_width_mm, self.page_height_mm)
    }
}

/// Per-page record of a rasterized compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCompressionJob {
    pub index: usize,
    pub scale: f64,
    pub quality: f64,
    pub geometry: PageGeometry,
}

fn px_to_mm(px: u32, dpi: f64) -> f64 {
    f64::from(px) * MM_PER_INCH / dpi
}

/// Geometry for `Fit` mode: the page is exactly the image at the reference
/// DPI, full bleed.
pub fn fit_page_geometry(px_width: u32, px_height: u32) -> PageGeometry {
    let width_mm = px_to_mm(px_width, REFERENCE_DPI);
    let height_mm = px_to_mm(px_height, REFERENCE_DPI);
    PageGeometry {
        page_width_mm: width_mm,
        page_height_mm: height_mm,
        image_x_mm: 0.0,
        image_y_mm: 0.0,
        image_width_mm: width_mm,
        image_height_mm: height_mm,
    }
}

/// Geometry for a named size: fixed portrait page, image scaled to fit the
/// margin box preserving aspect ratio and centered on both axes.
pub fn named_page_geometry(mode: PageSizeMode, px_width: u32, px_height: u32) -> PageGeometry {
    let (page_w, page_h) = match mode.named_size_mm() {
        Some(size) => size,
        None => return fit_page_geometry(px_width, px_height),
    };

    let box_w = page_w - 2.0 * PAGE_MARGIN_MM;
    let box_h = page_h - 2.0 * PAGE_MARGIN_MM;

    let src_w = px_to_mm(px_width, REFERENCE_DPI);
    let src_h = px_to_mm(px_height, REFERENCE_DPI);
    let scale = (box_w / src_w).min(box_h / src_h);
    let image_w = src_w * scale;
    let image_h = src_h * scale;

    PageGeometry {
        page_width_mm: page_w,
        page_height_mm: page_h,
        image_x_mm: PAGE_MARGIN_MM + (box_w - image_w) / 2.0,
        image_y_mm: PAGE_MARGIN_MM + (box_h - image_h) / 2.0,
        image_width_mm: image_w,
        image_height_mm: image_h,
    }
}

/// Geometry for a rasterized recompression page: full bleed, sized by the
/// rendered pixel count at the target DPI.
pub fn rasterized_page_geometry(px_width: u32, px_height: u32, target_dpi: f64) -> PageGeometry {
    let width_mm = px_to_mm(px_width, target_dpi);
    let height_mm = px_to_mm(px_height, target_dpi);
    PageGeometry {
        page_width_mm: width_mm,
        page_height_mm: height_mm,
        image_x_mm: 0.0,
        image_y_mm: 0.0,
        image_width_mm: width_mm,
        image_height_mm: height_mm,
    }
}

/// Aspect-preserving downscale of pixel dimensions to the payload cap.
/// Dimensions already within the cap pass through unchanged.
pub fn cap_to_max_edge(width: u32, height: u32) -> (u32, u32) {
    let max_edge = width.max(height);
    if max_edge <= MAX_PAYLOAD_EDGE_PX {
        return (width, height);
    }
    let scale = f64::from(MAX_PAYLOAD_EDGE_PX) / f64::from(max_edge);
    let new_w = ((f64::from(width) * scale).round() as u32).max(1);
    let new_h = ((f64::from(height) * scale).round() as u32).max(1);
    (new_w, new_h)
}
