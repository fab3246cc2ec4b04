//! Placement geometry: anchor points and the tiled grid.

use super::spec::Anchor;

/// Ceiling on grid columns per row. Steps are floored to `side / 256` so a
/// degenerate spacing or font size cannot make the grid allocation
/// unbounded.
const MAX_STEPS_PER_AXIS: f64 = 256.0;

/// The (x, y) text-center point for a named anchor.
///
/// Anchored text is inset from each touched edge by `padding + fontSize`
/// horizontally and `padding + fontSize / 2` vertically, with
/// `padding = fontSize * 0.8`, so center-aligned glyphs do not clip at the
/// edge. The untouched axis sits at the midpoint.
pub fn anchor_point(anchor: Anchor, width: f64, height: f64, font_size: f64) -> (f64, f64) {
    let padding = font_size * 0.8;
    let left = padding + font_size;
    let right = width - padding - font_size;
    let top = padding + font_size / 2.0;
    let bottom = height - padding - font_size / 2.0;

    match anchor {
        Anchor::TopLeft => (left, top),
        Anchor::TopCenter => (width / 2.0, top),
        Anchor::TopRight => (right, top),
        Anchor::CenterLeft => (left, height / 2.0),
        Anchor::Center => (width / 2.0, height / 2.0),
        Anchor::CenterRight => (right, height / 2.0),
        Anchor::BottomLeft => (left, bottom),
        Anchor::BottomCenter => (width / 2.0, bottom),
        Anchor::BottomRight => (right, bottom),
    }
}

/// Text-center points for the tiled placement.
///
/// The horizontal step is `max(textWidth * 1.5, fontSize * 3)` scaled by the
/// spacing percentage; the vertical step is 0.7 of that (offset rows read
/// less like banding). The grid fills a square of side twice the image
/// diagonal, centered on the image center, so a rotation about the center by
/// any angle still covers every corner of the image.
pub fn tile_positions(
    width: f64,
    height: f64,
    text_width: f64,
    font_size: f64,
    spacing_percent: f64,
) -> Vec<(f64, f64)> {
    let side = 2.0 * (width * width + height * height).sqrt();
    let step_x = ((text_width * 1.5).max(font_size * 3.0) * (spacing_percent / 100.0))
        .max(side / MAX_STEPS_PER_AXIS);
    let step_y = 0.7 * step_x;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let min_x = cx - side / 2.0;
    let max_x = cx + side / 2.0;
    let min_y = cy - side / 2.0;
    let max_y = cy + side / 2.0;

    let mut positions = Vec::new();
    let mut y = min_y;
    while y <= max_y {
        let mut x = min_x;
        while x <= max_x {
            positions.push((x, y));
            x += step_x;
        }
        y += step_y;
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_anchor_corners() {
        // font_size 20: padding 16, horizontal inset 36, vertical inset 26.
        let (x, y) = anchor_point(Anchor::TopLeft, 800.0, 600.0, 20.0);
        assert!((x - 36.0).abs() < EPS);
        assert!((y - 26.0).abs() < EPS);

        let (x, y) = anchor_point(Anchor::BottomRight, 800.0, 600.0, 20.0);
        assert!((x - 764.0).abs() < EPS);
        assert!((y - 574.0).abs() < EPS);

        let (x, y) = anchor_point(Anchor::TopRight, 800.0, 600.0, 20.0);
        assert!((x - 764.0).abs() < EPS);
        assert!((y - 26.0).abs() < EPS);
    }

    #[test]
    fn test_anchor_edges_use_midpoint_on_untouched_axis() {
        let (x, y) = anchor_point(Anchor::TopCenter, 800.0, 600.0, 20.0);
        assert!((x - 400.0).abs() < EPS);
        assert!((y - 26.0).abs() < EPS);

        let (x, y) = anchor_point(Anchor::CenterLeft, 800.0, 600.0, 20.0);
        assert!((x - 36.0).abs() < EPS);
        assert!((y - 300.0).abs() < EPS);

        let (x, y) = anchor_point(Anchor::Center, 800.0, 600.0, 20.0);
        assert!((x - 400.0).abs() < EPS);
        assert!((y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_tile_step_from_text_width() {
        // text_width * 1.5 = 300 dominates font_size * 3 = 72.
        let positions = tile_positions(800.0, 600.0, 200.0, 24.0, 100.0);
        let first_row_y = positions[0].1;
        let row: Vec<f64> = positions
            .iter()
            .filter(|(_, y)| (*y - first_row_y).abs() < EPS)
            .map(|(x, _)| *x)
            .collect();
        assert!((row[1] - row[0] - 300.0).abs() < EPS);
    }

    #[test]
    fn test_tile_step_floor_from_font_size() {
        // font_size * 3 = 90 dominates text_width * 1.5 = 15.
        let positions = tile_positions(800.0, 600.0, 10.0, 30.0, 100.0);
        let first_row_y = positions[0].1;
        let row: Vec<f64> = positions
            .iter()
            .filter(|(_, y)| (*y - first_row_y).abs() < EPS)
            .map(|(x, _)| *x)
            .collect();
        assert!((row[1] - row[0] - 90.0).abs() < EPS);
    }

    #[test]
    fn test_spacing_percent_scales_step() {
        let wide = tile_positions(800.0, 600.0, 200.0, 24.0, 200.0);
        let tight = tile_positions(800.0, 600.0, 200.0, 24.0, 100.0);
        assert!(wide.len() < tight.len());
    }

    #[test]
    fn test_degenerate_spacing_keeps_grid_bounded() {
        // A near-zero spacing on a large image must not blow up the grid:
        // the step floor caps it at 257 columns and 367 rows.
        let positions = tile_positions(4000.0, 3000.0, 1.0, 0.5, 0.001);
        assert!(!positions.is_empty());
        assert!(positions.len() <= 257 * 367, "{} tiles", positions.len());

        let tiny_font = tile_positions(4000.0, 3000.0, 0.1, 0.001, 100.0);
        assert!(tiny_font.len() <= 257 * 367, "{} tiles", tiny_font.len());
    }
}
