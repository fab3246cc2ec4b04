//! Text watermark compositing.
//!
//! A watermark render is a pure function of the source raster and a
//! [`WatermarkSpec`]: the same spec against the same pixels always produces
//! the same output. Placement is either a single named anchor or a tiled
//! grid sized to survive rotation without blank corners.
//!
//! Text rasterization is pluggable through the [`TextSurface`] trait so the
//! placement logic can be tested without font data; [`GlyphSurface`] is the
//! concrete implementation over caller-supplied font bytes.

mod glyph;
mod layout;
mod render;
mod spec;

use crate::error::{Categorized, ErrorCategory};
use thiserror::Error;

pub use glyph::GlyphSurface;
pub use layout::{anchor_point, tile_positions};
pub use render::{render_watermark, TextStyle, TextSurface};
pub use spec::{parse_hex_color, Anchor, Color, Placement, WatermarkSpec};

/// Errors that can occur while preparing or rendering a watermark.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// Color string is not #RGB or #RRGGBB
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Opacity outside 0-100
    #[error("Opacity must be between 0 and 100, got {0}")]
    InvalidOpacity(f64),

    /// Font size must be positive
    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f64),

    /// Tile spacing must be positive
    #[error("Tile spacing must be positive, got {0}%")]
    InvalidTileSpacing(f64),

    /// Font bytes could not be parsed
    #[error("Failed to load font: {0}")]
    FontUnreadable(String),
}

impl Categorized for WatermarkError {
    fn category(&self) -> ErrorCategory {
        match self {
            WatermarkError::InvalidColor(_)
            | WatermarkError::InvalidOpacity(_)
            | WatermarkError::InvalidFontSize(_)
            | WatermarkError::InvalidTileSpacing(_) => ErrorCategory::InvalidInput,
            WatermarkError::FontUnreadable(_) => ErrorCategory::ConversionFailure,
        }
    }
}
