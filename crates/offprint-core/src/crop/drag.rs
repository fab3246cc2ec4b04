//! Drag gesture geometry: handles, sessions, and the resize/translate
//! rules.
//!
//! The pointer adapter outside the core decides *what* was grabbed (the
//! region body or one of the eight handles) and feeds raw pointer positions
//! in display-scaled space; everything else happens here.

use super::region::{CropRegion, MIN_REGION_EDGE};
use serde::{Deserialize, Serialize};

/// A pointer position in display-scaled space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The eight resize handles around the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Which edges a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeSet {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Handle {
    /// Table mapping each handle to the edges it affects.
    pub(crate) fn edges(self) -> EdgeSet {
        let (north, south, east, west) = match self {
            Handle::North => (true, false, false, false),
            Handle::South => (false, true, false, false),
            Handle::East => (false, false, true, false),
            Handle::West => (false, false, false, true),
            Handle::NorthEast => (true, false, true, false),
            Handle::NorthWest => (true, false, false, true),
            Handle::SouthEast => (false, true, true, false),
            Handle::SouthWest => (false, true, false, true),
        };
        EdgeSet {
            north,
            south,
            east,
            west,
        }
    }

    /// True for the four corner handles.
    pub fn is_corner(self) -> bool {
        let e = self.edges();
        (e.north || e.south) && (e.east || e.west)
    }
}

/// What the pointer grabbed at gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    /// The region body: the whole box translates.
    Body,
    /// A resize handle.
    Handle(Handle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragMode {
    Translate,
    Resize(Handle),
}

/// Snapshot of region geometry at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Snapshot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An active pointer gesture. Exists only between gesture-start and
/// gesture-end; discarded immediately on release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub(crate) mode: DragMode,
    pub(crate) start: Snapshot,
    pub(crate) start_pointer: Point,
}

impl DragSession {
    pub(crate) fn begin(region: &CropRegion, pointer: Point, target: DragTarget) -> Self {
        let mode = match target {
            DragTarget::Body => DragMode::Translate,
            DragTarget::Handle(handle) => DragMode::Resize(handle),
        };
        Self {
            mode,
            start: Snapshot {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
            },
            start_pointer: pointer,
        }
    }

    /// Apply a pointer move to the region.
    ///
    /// Translate clamps the origin into `[0, bounds - size]`. Resize uses a
    /// per-axis soft stop: a candidate that would leave bounds on an axis is
    /// rejected for that axis, keeping the previous valid value instead of
    /// clamping (different gesture feel at the boundary). With an aspect
    /// ratio set, acceptance is all-or-nothing so the ratio survives every
    /// update.
    pub(crate) fn update(&self, region: &mut CropRegion, pointer: Point) {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;

        match self.mode {
            DragMode::Translate => {
                region.x = (self.start.x + dx).clamp(0.0, region.bounds.width - region.width);
                region.y = (self.start.y + dy).clamp(0.0, region.bounds.height - region.height);
            }
            DragMode::Resize(handle) => self.resize(region, handle, dx, dy),
        }
    }

    fn resize(&self, region: &mut CropRegion, handle: Handle, dx: f64, dy: f64) {
        const EPS: f64 = 1e-9;
        let edges = handle.edges();
        let start = self.start;

        // Display floors. With a ratio set the floor on the primary axis is
        // raised so the derived axis never dips under the 20-unit minimum.
        let ratio = region.aspect_ratio;
        let min_w = match ratio {
            Some(r) => MIN_REGION_EDGE.max(MIN_REGION_EDGE * r),
            None => MIN_REGION_EDGE,
        };
        let min_h = match ratio {
            Some(r) => MIN_REGION_EDGE.max(MIN_REGION_EDGE / r),
            None => MIN_REGION_EDGE,
        };

        // Raw per-axis candidates: E/S move the far edge, W/N move the
        // origin with the far edge held fixed.
        let mut new_w = start.width;
        let mut new_h = start.height;
        if edges.east {
            new_w = (start.width + dx).max(min_w);
        } else if edges.west {
            new_w = (start.width - dx).max(min_w);
        }
        if edges.south {
            new_h = (start.height + dy).max(min_h);
        } else if edges.north {
            new_h = (start.height - dy).max(min_h);
        }

        if let Some(r) = ratio {
            if handle.is_corner() {
                // The proportionally larger change is primary; the other
                // dimension is derived from it.
                let rel_w = ((new_w - start.width) / start.width).abs();
                let rel_h = ((new_h - start.height) / start.height).abs();
                if rel_w >= rel_h {
                    new_h = new_w / r;
                } else {
                    new_w = new_h * r;
                }
            } else if edges.east || edges.west {
                new_h = new_w / r;
            } else {
                new_w = new_h * r;
            }
        }

        // Origins: W/N keep the opposite edge fixed.
        let new_x = if edges.west {
            start.x + start.width - new_w
        } else {
            start.x
        };
        let new_y = if edges.north {
            start.y + start.height - new_h
        } else {
            start.y
        };

        // Soft stop at the surface edge.
        let x_ok = new_x >= -EPS && new_x + new_w <= region.bounds.width + EPS;
        let y_ok = new_y >= -EPS && new_y + new_h <= region.bounds.height + EPS;

        if ratio.is_some() {
            if x_ok && y_ok {
                region.x = new_x;
                region.y = new_y;
                region.width = new_w;
                region.height = new_h;
            }
        } else {
            if x_ok {
                region.x = new_x;
                region.width = new_w;
            }
            if y_ok {
                region.y = new_y;
                region.height = new_h;
            }
        }
    }
}
