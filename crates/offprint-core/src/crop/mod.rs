//! Interactive crop editor.
//!
//! A rectangle-in-scaled-space state machine driven by pointer gestures.
//! The editor owns a [`CropRegion`] in *display-scaled* coordinates (the
//! editing surface), related to the image's natural pixel grid by a single
//! scalar `scale`. Committing converts the region back to natural pixels as
//! a [`CropCommand`] that [`apply_crop`] executes.
//!
//! # Coordinate Spaces
//!
//! - **Natural pixel space**: the untransformed pixel grid of the decoded
//!   image.
//! - **Display-scaled space**: the editing surface;
//!   `naturalPixels = displayUnits / scale`.
//!
//! # State Machine
//!
//! Closed → Open(idle) → Open(dragging) → Open(idle) → closed via cancel
//! (drop) or apply (commit). Only one drag session may be live at a time.

mod apply;
mod drag;
mod editor;
mod region;

pub use apply::apply_crop;
pub use drag::{DragSession, DragTarget, Handle, Point};
pub use editor::CropEditor;
pub use region::{
    Bounds, CropCommand, CropError, CropRegion, Viewport, MIN_COMMIT_PIXELS, MIN_REGION_EDGE,
};
