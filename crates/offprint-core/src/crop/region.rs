//! Crop region state: creation, aspect-ratio switching, and commit.

use crate::error::{Categorized, ErrorCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum width/height of the region in display units.
pub const MIN_REGION_EDGE: f64 = 20.0;

/// Minimum committed width/height in natural pixels. Stricter than the
/// display floor: extreme downscaling can make a legal display-space region
/// collapse below a usable pixel count.
pub const MIN_COMMIT_PIXELS: f64 = 10.0;

/// Padding used to seed a fresh region, in display units.
const SEED_PADDING: f64 = 20.0;

/// Errors raised by the crop editor.
#[derive(Debug, Error)]
pub enum CropError {
    /// The committed region is below the natural-pixel floor.
    #[error("Crop region too small: {width:.0}x{height:.0} px (minimum 10x10)")]
    RegionTooSmall { width: f64, height: f64 },

    /// Aspect ratio must be finite, positive, and representable on the
    /// editing surface with both edges at the 20-unit minimum or above.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),

    /// A second drag was started while one is live.
    #[error("A drag gesture is already in progress")]
    DragInProgress,

    /// `update_drag` was called with no live gesture.
    #[error("No drag gesture in progress")]
    NoActiveDrag,

    /// Image or viewport dimensions were zero or negative.
    #[error("Invalid image or viewport dimensions")]
    InvalidDimensions,
}

impl Categorized for CropError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::InvalidInput
    }
}

/// Maximum extent of the editing surface in display-scaled space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Maximum viewport the editing surface may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A crop selection in display-scaled space.
///
/// Invariants after every committed mutation:
/// - `width >= 20`, `height >= 20` (display units)
/// - `0 <= x`, `0 <= y`, `x + width <= bounds.width`,
///   `y + height <= bounds.height`
/// - `width / height == aspect_ratio` when a ratio is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Top-left corner, display-scaled space.
    pub x: f64,
    pub y: f64,
    /// Size, display-scaled space.
    pub width: f64,
    pub height: f64,
    /// Ratio of display-scaled space to natural pixel space.
    pub scale: f64,
    /// Enforced width/height ratio, or free-form when `None`.
    pub aspect_ratio: Option<f64>,
    /// Extent of the editing surface.
    pub bounds: Bounds,
}

/// A committed crop in natural pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCommand {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Open a crop session for an image of the given natural size inside a
    /// viewport.
    ///
    /// `scale = min(viewport.width / natural_width,
    /// viewport.height / natural_height, 1)` — the surface never upscales.
    /// The region is seeded with 20 units of padding on all sides, clamped
    /// so it stays legal on small surfaces.
    pub fn open(
        natural_width: f64,
        natural_height: f64,
        viewport: Viewport,
    ) -> Result<Self, CropError> {
        if natural_width <= 0.0
            || natural_height <= 0.0
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Err(CropError::InvalidDimensions);
        }

        let scale = (viewport.width / natural_width)
            .min(viewport.height / natural_height)
            .min(1.0);
        let bounds = Bounds {
            width: natural_width * scale,
            height: natural_height * scale,
        };

        let pad_x = SEED_PADDING.min(((bounds.width - MIN_REGION_EDGE) / 2.0).max(0.0));
        let pad_y = SEED_PADDING.min(((bounds.height - MIN_REGION_EDGE) / 2.0).max(0.0));

        Ok(Self {
            x: pad_x,
            y: pad_y,
            width: bounds.width - 2.0 * pad_x,
            height: bounds.height - 2.0 * pad_y,
            scale,
            aspect_ratio: None,
            bounds,
        })
    }

    /// Switch between a fixed aspect ratio and free-form editing.
    ///
    /// Setting a ratio shrinks whichever dimension is proportionally too
    /// large, then re-clamps. Switching to free leaves the geometry
    /// untouched.
    ///
    /// Rejects ratios the surface cannot represent: a legal region needs
    /// `width <= bounds.width` and `height <= bounds.height` with both
    /// edges at least 20 units, which bounds the ratio to
    /// `[20 / bounds.height, bounds.width / 20]`.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<(), CropError> {
        let Some(r) = ratio else {
            self.aspect_ratio = None;
            return Ok(());
        };
        if !r.is_finite() || r <= 0.0 {
            return Err(CropError::InvalidAspectRatio(r));
        }
        if r < MIN_REGION_EDGE / self.bounds.height || r > self.bounds.width / MIN_REGION_EDGE {
            return Err(CropError::InvalidAspectRatio(r));
        }

        if self.width / self.height > r {
            self.width = self.height * r;
        } else {
            self.height = self.width / r;
        }
        if self.width < MIN_REGION_EDGE {
            self.width = MIN_REGION_EDGE;
            self.height = MIN_REGION_EDGE / r;
        }
        if self.height < MIN_REGION_EDGE {
            self.height = MIN_REGION_EDGE;
            self.width = MIN_REGION_EDGE * r;
        }

        self.aspect_ratio = Some(r);
        self.constrain();
        Ok(())
    }

    /// Clamp the region back into bounds, preserving the aspect ratio when
    /// one is set.
    pub(crate) fn constrain(&mut self) {
        if self.width > self.bounds.width || self.height > self.bounds.height {
            if self.aspect_ratio.is_some() {
                let shrink = (self.bounds.width / self.width)
                    .min(self.bounds.height / self.height)
                    .min(1.0);
                self.width *= shrink;
                self.height *= shrink;
            } else {
                self.width = self.width.min(self.bounds.width);
                self.height = self.height.min(self.bounds.height);
            }
        }
        self.x = self.x.clamp(0.0, (self.bounds.width - self.width).max(0.0));
        self.y = self
            .y
            .clamp(0.0, (self.bounds.height - self.height).max(0.0));
    }

    /// Convert the region to natural pixel space.
    ///
    /// # Errors
    ///
    /// Fails with [`CropError::RegionTooSmall`] when the natural-space
    /// width or height falls below 10 pixels. A region of exactly 10 pixels
    /// succeeds.
    pub fn commit(&self) -> Result<CropCommand, CropError> {
        let width_px = self.width / self.scale;
        let height_px = self.height / self.scale;
        if width_px < MIN_COMMIT_PIXELS || height_px < MIN_COMMIT_PIXELS {
            return Err(CropError::RegionTooSmall {
                width: width_px,
                height: height_px,
            });
        }

        Ok(CropCommand {
            left: (self.x / self.scale).round() as u32,
            top: (self.y / self.scale).round() as u32,
            width: width_px.round() as u32,
            height: height_px.round() as u32,
        })
    }

    /// True when all region invariants hold (used by tests and debug
    /// assertions).
    pub fn is_valid(&self) -> bool {
        const EPS: f64 = 1e-6;
        self.x >= -EPS
            && self.y >= -EPS
            && self.x + self.width <= self.bounds.width + EPS
            && self.y + self.height <= self.bounds.height + EPS
            && self.width >= MIN_REGION_EDGE - EPS
            && self.height >= MIN_REGION_EDGE - EPS
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: opening a session always yields a valid region with
        /// scale <= 1.
        #[test]
        fn prop_open_yields_valid_region(
            natural_w in 500.0f64..=5000.0,
            natural_h in 500.0f64..=5000.0,
            view_w in 400.0f64..=2000.0,
            view_h in 400.0f64..=2000.0,
        ) {
            let region = CropRegion::open(
                natural_w,
                natural_h,
                Viewport { width: view_w, height: view_h },
            ).unwrap();

            prop_assert!(region.scale <= 1.0);
            prop_assert!(region.is_valid());
        }

        /// Property: setting any representable ratio preserves it and keeps
        /// the region valid, including near the surface extremes.
        #[test]
        fn prop_aspect_ratio_applied(
            ratio in 0.04f64..=39.0,
        ) {
            let mut region = CropRegion::open(
                4000.0,
                3000.0,
                Viewport { width: 800.0, height: 600.0 },
            ).unwrap();

            region.set_aspect_ratio(Some(ratio)).unwrap();

            let actual = region.width / region.height;
            prop_assert!((actual - ratio).abs() < 1e-6,
                "expected ratio {ratio}, got {actual}");
            prop_assert!(region.is_valid());
        }
    }
}
