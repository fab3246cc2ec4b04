//! The crop editor state machine.
//!
//! One editor per crop session. The region is mutated exclusively through
//! the gesture transitions here; the pointer adapter outside the core only
//! translates events into `begin_drag` / `update_drag` / `end_drag` calls.

use super::drag::{DragSession, DragTarget, Point};
use super::region::{CropCommand, CropError, CropRegion, Viewport};

/// An open crop session: a region plus at most one live drag gesture.
#[derive(Debug, Clone)]
pub struct CropEditor {
    region: CropRegion,
    session: Option<DragSession>,
}

impl CropEditor {
    /// Open a session for an image of the given natural size.
    pub fn open(
        natural_width: f64,
        natural_height: f64,
        viewport: Viewport,
    ) -> Result<Self, CropError> {
        Ok(Self {
            region: CropRegion::open(natural_width, natural_height, viewport)?,
            session: None,
        })
    }

    /// The current region geometry.
    pub fn region(&self) -> &CropRegion {
        &self.region
    }

    /// True while a drag gesture is live.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Switch the aspect-ratio constraint. Rejected mid-gesture.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<(), CropError> {
        if self.session.is_some() {
            return Err(CropError::DragInProgress);
        }
        self.region.set_aspect_ratio(ratio)
    }

    /// Start a gesture. Starting a second gesture while one is live is an
    /// implementation error and is rejected.
    pub fn begin_drag(&mut self, pointer: Point, target: DragTarget) -> Result<(), CropError> {
        if self.session.is_some() {
            return Err(CropError::DragInProgress);
        }
        self.session = Some(DragSession::begin(&self.region, pointer, target));
        Ok(())
    }

    /// Apply a pointer move to the live gesture.
    pub fn update_drag(&mut self, pointer: Point) -> Result<(), CropError> {
        let session = self.session.clone().ok_or(CropError::NoActiveDrag)?;
        session.update(&mut self.region, pointer);
        Ok(())
    }

    /// Release the gesture. Idempotent: browsers deliver duplicate
    /// pointer-up events.
    pub fn end_drag(&mut self) {
        self.session = None;
    }

    /// Close the session and produce the natural-pixel crop command.
    pub fn apply(self) -> Result<CropCommand, CropError> {
        self.region.commit()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::crop::Handle;
    use proptest::prelude::*;

    fn handle_strategy() -> impl Strategy<Value = Handle> {
        prop_oneof![
            Just(Handle::North),
            Just(Handle::South),
            Just(Handle::East),
            Just(Handle::West),
            Just(Handle::NorthEast),
            Just(Handle::NorthWest),
            Just(Handle::SouthEast),
            Just(Handle::SouthWest),
        ]
    }

    fn target_strategy() -> impl Strategy<Value = DragTarget> {
        prop_oneof![
            Just(DragTarget::Body),
            handle_strategy().prop_map(DragTarget::Handle),
        ]
    }

    fn gesture_strategy() -> impl Strategy<Value = (DragTarget, Vec<(f64, f64)>)> {
        (
            target_strategy(),
            prop::collection::vec((-1000.0f64..=2000.0, -1000.0f64..=2000.0), 1..8),
        )
    }

    proptest! {
        /// Property: region invariants hold after every update in any drag
        /// sequence.
        #[test]
        fn prop_invariants_hold_through_drag_sequences(
            gestures in prop::collection::vec(gesture_strategy(), 1..6),
        ) {
            let mut editor = CropEditor::open(
                4000.0,
                3000.0,
                Viewport { width: 800.0, height: 600.0 },
            ).unwrap();

            for (target, moves) in gestures {
                editor.begin_drag(Point::new(400.0, 300.0), target).unwrap();
                for (x, y) in moves {
                    editor.update_drag(Point::new(x, y)).unwrap();
                    prop_assert!(editor.region().is_valid(),
                        "invariants broken: {:?}", editor.region());
                }
                editor.end_drag();
            }
        }

        /// Property: with an aspect ratio set, width/height == r after
        /// every update.
        #[test]
        fn prop_aspect_ratio_held_through_drag_sequences(
            ratio in 0.5f64..=2.0,
            gestures in prop::collection::vec(gesture_strategy(), 1..6),
        ) {
            let mut editor = CropEditor::open(
                4000.0,
                3000.0,
                Viewport { width: 800.0, height: 600.0 },
            ).unwrap();
            editor.set_aspect_ratio(Some(ratio)).unwrap();

            for (target, moves) in gestures {
                editor.begin_drag(Point::new(400.0, 300.0), target).unwrap();
                for (x, y) in moves {
                    editor.update_drag(Point::new(x, y)).unwrap();
                    let r = editor.region();
                    let actual = r.width / r.height;
                    prop_assert!((actual - ratio).abs() < 1e-6,
                        "ratio drifted: expected {ratio}, got {actual}");
                    prop_assert!(editor.region().is_valid());
                }
                editor.end_drag();
            }
        }
    }
}
