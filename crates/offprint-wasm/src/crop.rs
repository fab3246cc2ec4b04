//! Interactive crop WASM bindings.
//!
//! The UI owns pointer events and hit-testing; everything else lives in the
//! core state machine wrapped here. A typical session:
//!
//! ```typescript
//! const session = new CropSession(image.width, image.height, 800, 600);
//! session.begin_drag({ Handle: "SouthEast" }, x, y);
//! session.update_drag(x2, y2);
//! session.end_drag();
//! const command = session.commit();
//! const cropped = apply_crop(image, command);
//! session.free();
//! ```

use crate::types::{js_error, JsDecodedImage};
use offprint_core::crop::{self, CropCommand, CropEditor, DragTarget, Point, Viewport};
use wasm_bindgen::prelude::*;

/// An open crop session over one image.
///
/// All coordinates passed to and read from the session are in
/// display-scaled space; `scale` relates them to natural pixels. The
/// committed command is in natural pixels.
#[wasm_bindgen]
pub struct CropSession {
    inner: CropEditor,
}

#[wasm_bindgen]
impl CropSession {
    /// Open a session for an image of the given natural size inside a
    /// viewport. The editing surface never upscales.
    #[wasm_bindgen(constructor)]
    pub fn new(
        natural_width: f64,
        natural_height: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<CropSession, JsValue> {
        let inner = CropEditor::open(
            natural_width,
            natural_height,
            Viewport {
                width: viewport_width,
                height: viewport_height,
            },
        )
        .map_err(js_error)?;
        Ok(CropSession { inner })
    }

    /// Region left edge, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.region().x
    }

    /// Region top edge, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.region().y
    }

    /// Region width, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.region().width
    }

    /// Region height, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.region().height
    }

    /// Display units per natural pixel (at most 1).
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.region().scale
    }

    /// Width of the editing surface, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn surface_width(&self) -> f64 {
        self.inner.region().bounds.width
    }

    /// Height of the editing surface, display-scaled space.
    #[wasm_bindgen(getter)]
    pub fn surface_height(&self) -> f64 {
        self.inner.region().bounds.height
    }

    /// True while a drag gesture is live.
    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Switch the aspect-ratio constraint. Pass `undefined` for free-form.
    /// Rejected while a drag gesture is live.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<(), JsValue> {
        self.inner.set_aspect_ratio(ratio).map_err(js_error)
    }

    /// Start a gesture.
    ///
    /// `target` is `"Body"` for a translate, or `{ Handle: name }` where
    /// name is one of `North`, `South`, `East`, `West`, `NorthEast`,
    /// `NorthWest`, `SouthEast`, `SouthWest`.
    pub fn begin_drag(&mut self, target: JsValue, x: f64, y: f64) -> Result<(), JsValue> {
        let target: DragTarget = serde_wasm_bindgen::from_value(target)
            .map_err(|e| JsValue::from_str(&format!("Invalid drag target: {e}")))?;
        self.inner
            .begin_drag(Point::new(x, y), target)
            .map_err(js_error)
    }

    /// Apply a pointer move to the live gesture.
    pub fn update_drag(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner.update_drag(Point::new(x, y)).map_err(js_error)
    }

    /// Release the gesture. Safe to call on duplicate pointer-up events.
    pub fn end_drag(&mut self) {
        self.inner.end_drag();
    }

    /// Produce the natural-pixel crop command as
    /// `{ left, top, width, height }`.
    ///
    /// Fails when the region falls below the 10-pixel natural-space floor.
    pub fn commit(&self) -> Result<JsValue, JsValue> {
        let command = self.inner.region().commit().map_err(js_error)?;
        serde_wasm_bindgen::to_value(&command).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

/// Execute a committed crop command against the full-resolution image.
#[wasm_bindgen]
pub fn apply_crop(image: &JsDecodedImage, command: JsValue) -> Result<JsDecodedImage, JsValue> {
    let command: CropCommand = serde_wasm_bindgen::from_value(command)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop command: {e}")))?;
    Ok(JsDecodedImage::from_decoded(crop::apply_crop(
        &image.to_decoded(),
        &command,
    )))
}
