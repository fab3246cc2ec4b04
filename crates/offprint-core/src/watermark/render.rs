//! The compositing pipeline: spec in, `fill_text` calls out.

use super::layout::{anchor_point, tile_positions};
use super::spec::{Color, Placement, WatermarkSpec};
use super::WatermarkError;

/// Drop shadow offset in pixels, applied on both axes.
const SHADOW_OFFSET: f64 = 2.0;

/// Styling for one `fill_text` pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// 0.0 to 1.0.
    pub alpha: f64,
    /// Clockwise degrees about `pivot`.
    pub rotation_degrees: f64,
    /// Rotation pivot in surface coordinates.
    pub pivot: (f64, f64),
}

/// A raster that can measure and draw text. (x, y) in `fill_text` is the
/// text center.
pub trait TextSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Width in pixels of the rendered text at the given size.
    fn measure_text(&self, text: &str, font_size: f64) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, style: &TextStyle);
}

/// Composite a watermark onto the surface.
///
/// Whitespace-only text is a no-op. Every placement gets a drop shadow pass
/// (black, half the configured alpha, fixed offset) under the text pass.
/// Anchored placements rotate about the anchor point, tiled placements about
/// the image center. The render is deterministic: same spec and same source
/// pixels produce the same output.
pub fn render_watermark<S: TextSurface>(
    surface: &mut S,
    spec: &WatermarkSpec,
) -> Result<(), WatermarkError> {
    if spec.text.trim().is_empty() {
        return Ok(());
    }
    let color = spec.validate()?;
    let alpha = spec.opacity_percent / 100.0;

    let width = f64::from(surface.width());
    let height = f64::from(surface.height());

    let (positions, pivot) = match spec.placement {
        Placement::Anchor { anchor } => {
            let point = anchor_point(anchor, width, height, spec.font_size);
            (vec![point], point)
        }
        Placement::Tiled { spacing_percent } => {
            let text_width = surface.measure_text(&spec.text, spec.font_size);
            let grid = tile_positions(width, height, text_width, spec.font_size, spacing_percent);
            (grid, (width / 2.0, height / 2.0))
        }
    };

    let shadow = TextStyle {
        color: Color::black(),
        alpha: alpha / 2.0,
        rotation_degrees: spec.rotation_degrees,
        pivot,
    };
    let text = TextStyle {
        color,
        alpha,
        rotation_degrees: spec.rotation_degrees,
        pivot,
    };

    for &(x, y) in &positions {
        surface.fill_text(
            &spec.text,
            x + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            spec.font_size,
            &shadow,
        );
        surface.fill_text(&spec.text, x, y, spec.font_size, &text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watermark::spec::Anchor;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        style: TextStyle,
    }

    /// Records fill_text calls; measures every glyph at 10px.
    struct MockSurface {
        width: u32,
        height: u32,
        calls: Vec<Call>,
    }

    impl MockSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
            }
        }
    }

    impl TextSurface for MockSurface {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn measure_text(&self, text: &str, _font_size: f64) -> f64 {
            text.chars().count() as f64 * 10.0
        }
        fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, style: &TextStyle) {
            self.calls.push(Call {
                text: text.to_string(),
                x,
                y,
                font_size,
                style: *style,
            });
        }
    }

    fn anchored_spec(anchor: Anchor) -> WatermarkSpec {
        WatermarkSpec {
            text: "Sample".to_string(),
            font_size: 20.0,
            opacity_percent: 60.0,
            rotation_degrees: 30.0,
            color: "#ff0000".to_string(),
            placement: Placement::Anchor { anchor },
        }
    }

    #[test]
    fn test_whitespace_text_is_a_noop() {
        let mut surface = MockSurface::new(800, 600);

        let mut spec = anchored_spec(Anchor::Center);
        spec.text = "   \t ".to_string();
        render_watermark(&mut surface, &spec).unwrap();
        assert!(surface.calls.is_empty());

        spec.text = String::new();
        render_watermark(&mut surface, &spec).unwrap();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_anchored_placement_draws_shadow_then_text() {
        let mut surface = MockSurface::new(800, 600);
        render_watermark(&mut surface, &anchored_spec(Anchor::BottomRight)).unwrap();

        assert_eq!(surface.calls.len(), 2);
        let expected = anchor_point(Anchor::BottomRight, 800.0, 600.0, 20.0);

        let shadow = &surface.calls[0];
        assert_eq!((shadow.x, shadow.y), (expected.0 + 2.0, expected.1 + 2.0));
        assert_eq!(shadow.style.color, Color::black());
        assert!((shadow.style.alpha - 0.3).abs() < 1e-9);

        let text = &surface.calls[1];
        assert_eq!((text.x, text.y), expected);
        assert_eq!(text.style.color, Color::new(255, 0, 0));
        assert!((text.style.alpha - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_anchored_rotation_pivots_on_anchor() {
        let mut surface = MockSurface::new(800, 600);
        render_watermark(&mut surface, &anchored_spec(Anchor::TopLeft)).unwrap();

        let expected = anchor_point(Anchor::TopLeft, 800.0, 600.0, 20.0);
        for call in &surface.calls {
            assert_eq!(call.style.pivot, expected);
            assert_eq!(call.style.rotation_degrees, 30.0);
        }
    }

    #[test]
    fn test_tiled_rotation_pivots_on_image_center() {
        let mut surface = MockSurface::new(800, 600);
        let spec = WatermarkSpec {
            placement: Placement::Tiled {
                spacing_percent: 150.0,
            },
            ..anchored_spec(Anchor::Center)
        };
        render_watermark(&mut surface, &spec).unwrap();

        assert!(surface.calls.len() > 2);
        for call in &surface.calls {
            assert_eq!(call.style.pivot, (400.0, 300.0));
        }
    }

    #[test]
    fn test_tiled_alternates_shadow_and_text() {
        let mut surface = MockSurface::new(400, 300);
        let spec = WatermarkSpec {
            placement: Placement::Tiled {
                spacing_percent: 200.0,
            },
            ..anchored_spec(Anchor::Center)
        };
        render_watermark(&mut surface, &spec).unwrap();

        assert_eq!(surface.calls.len() % 2, 0);
        for pair in surface.calls.chunks(2) {
            assert_eq!(pair[0].style.color, Color::black());
            assert_eq!(pair[1].style.color, Color::new(255, 0, 0));
            assert_eq!(pair[0].x, pair[1].x + 2.0);
            assert_eq!(pair[0].y, pair[1].y + 2.0);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let spec = WatermarkSpec {
            placement: Placement::Tiled {
                spacing_percent: 120.0,
            },
            ..anchored_spec(Anchor::Center)
        };

        let mut first = MockSurface::new(800, 600);
        let mut second = MockSurface::new(800, 600);
        render_watermark(&mut first, &spec).unwrap();
        render_watermark(&mut second, &spec).unwrap();

        assert_eq!(first.calls, second.calls);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let mut surface = MockSurface::new(800, 600);

        let mut spec = anchored_spec(Anchor::Center);
        spec.opacity_percent = 101.0;
        assert!(matches!(
            render_watermark(&mut surface, &spec),
            Err(WatermarkError::InvalidOpacity(_))
        ));

        let mut spec = anchored_spec(Anchor::Center);
        spec.color = "blue".to_string();
        assert!(matches!(
            render_watermark(&mut surface, &spec),
            Err(WatermarkError::InvalidColor(_))
        ));

        assert!(surface.calls.is_empty());
    }
}
