//! A [`TextSurface`] over an RGB raster, rasterizing text with `ab_glyph`.
//!
//! Fonts are supplied by the caller as raw bytes; the crate embeds none.

use super::render::{TextStyle, TextSurface};
use super::spec::Color;
use super::WatermarkError;
use crate::decode::DecodedImage;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// An image plus a loaded font. Consumes the image on construction and
/// yields it back, composited, through [`GlyphSurface::into_image`].
pub struct GlyphSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    font: FontVec,
}

impl GlyphSurface {
    pub fn new(image: DecodedImage, font_bytes: Vec<u8>) -> Result<Self, WatermarkError> {
        let font = FontVec::try_from_vec(font_bytes)
            .map_err(|e| WatermarkError::FontUnreadable(e.to_string()))?;
        Ok(Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
            font,
        })
    }

    /// Recover the composited image.
    pub fn into_image(self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels,
        }
    }

    /// Kerned advance width of the text in pixels.
    fn advance_width(&self, text: &str, font_size: f64) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(font_size as f32));
        let mut width = 0.0f32;
        let mut prev: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Rasterize the text with color and alpha baked into an RGBA tile.
    fn rasterize(&self, text: &str, font_size: f64, color: Color, alpha: f64) -> RgbaImage {
        let scale = PxScale::from(font_size as f32);
        let scaled = self.font.as_scaled(scale);

        let width = self.advance_width(text, font_size).ceil() as u32 + 2;
        let height = scaled.height().ceil() as u32 + 2;
        let mut tile = RgbaImage::new(width.max(1), height.max(1));

        let max_alpha = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        let baseline_y = scaled.ascent() + 1.0;

        let mut cursor_x = 1.0f32;
        let mut prev: Option<ab_glyph::GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                cursor_x += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    if x >= 0 && y >= 0 && (x as u32) < tile.width() && (y as u32) < tile.height() {
                        let pixel_alpha = (coverage * max_alpha as f32) as u8;
                        let existing = tile.get_pixel(x as u32, y as u32);
                        // Anti-aliased edges of adjacent glyphs may overlap.
                        if pixel_alpha > existing[3] {
                            tile.put_pixel(
                                x as u32,
                                y as u32,
                                Rgba([color.r, color.g, color.b, pixel_alpha]),
                            );
                        }
                    }
                });
            }

            cursor_x += scaled.h_advance(id);
            prev = Some(id);
        }

        tile
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f64) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.pixels[idx] = blend_over(self.pixels[idx], color.r, alpha);
        self.pixels[idx + 1] = blend_over(self.pixels[idx + 1], color.g, alpha);
        self.pixels[idx + 2] = blend_over(self.pixels[idx + 2], color.b, alpha);
    }

    /// Composite the tile so its center lands at (x, y), unrotated.
    fn composite_direct(&mut self, tile: &RgbaImage, x: f64, y: f64) {
        let origin_x = (x - f64::from(tile.width()) / 2.0).round() as i64;
        let origin_y = (y - f64::from(tile.height()) / 2.0).round() as i64;

        for (px, py, p) in tile.enumerate_pixels() {
            if p[3] == 0 {
                continue;
            }
            let alpha = f64::from(p[3]) / 255.0;
            self.blend(
                origin_x + i64::from(px),
                origin_y + i64::from(py),
                Color::new(p[0], p[1], p[2]),
                alpha,
            );
        }
    }

    /// Composite the tile centered at (x, y), rotated clockwise about the
    /// pivot. Destination pixels are inverse-mapped into the tile and
    /// sampled bilinearly.
    fn composite_rotated(&mut self, tile: &RgbaImage, x: f64, y: f64, degrees: f64, pivot: (f64, f64)) {
        let origin_x = x - f64::from(tile.width()) / 2.0;
        let origin_y = y - f64::from(tile.height()) / 2.0;
        let (pvx, pvy) = pivot;
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();

        // Destination bounding box from the rotated tile corners.
        let tw = f64::from(tile.width());
        let th = f64::from(tile.height());
        let corners = [
            (origin_x, origin_y),
            (origin_x + tw, origin_y),
            (origin_x, origin_y + th),
            (origin_x + tw, origin_y + th),
        ];
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (cx, cy) in corners {
            let rx = pvx + (cx - pvx) * cos - (cy - pvy) * sin;
            let ry = pvy + (cx - pvx) * sin + (cy - pvy) * cos;
            min_x = min_x.min(rx);
            max_x = max_x.max(rx);
            min_y = min_y.min(ry);
            max_y = max_y.max(ry);
        }

        let x0 = min_x.floor().max(0.0) as i64;
        let y0 = min_y.floor().max(0.0) as i64;
        let x1 = (max_x.ceil() as i64).min(i64::from(self.width) - 1);
        let y1 = (max_y.ceil() as i64).min(i64::from(self.height) - 1);

        for dy in y0..=y1 {
            for dx in x0..=x1 {
                // Inverse rotation back into tile space.
                let ox = dx as f64 - pvx;
                let oy = dy as f64 - pvy;
                let sx = pvx + ox * cos + oy * sin - origin_x;
                let sy = pvy - ox * sin + oy * cos - origin_y;

                if sx < 0.0 || sy < 0.0 || sx >= tw - 1.0 || sy >= th - 1.0 {
                    continue;
                }

                let tx = sx.floor() as u32;
                let ty = sy.floor() as u32;
                let fx = sx - f64::from(tx);
                let fy = sy - f64::from(ty);

                let p00 = tile.get_pixel(tx, ty);
                let p10 = tile.get_pixel(tx + 1, ty);
                let p01 = tile.get_pixel(tx, ty + 1);
                let p11 = tile.get_pixel(tx + 1, ty + 1);

                let sample = |c: usize| -> f64 {
                    f64::from(p00[c]) * (1.0 - fx) * (1.0 - fy)
                        + f64::from(p10[c]) * fx * (1.0 - fy)
                        + f64::from(p01[c]) * (1.0 - fx) * fy
                        + f64::from(p11[c]) * fx * fy
                };

                let alpha = sample(3) / 255.0;
                if alpha <= 0.0 {
                    continue;
                }
                let color = Color::new(
                    sample(0).clamp(0.0, 255.0) as u8,
                    sample(1).clamp(0.0, 255.0) as u8,
                    sample(2).clamp(0.0, 255.0) as u8,
                );
                self.blend(dx, dy, color, alpha.min(1.0));
            }
        }
    }
}

impl TextSurface for GlyphSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        f64::from(self.advance_width(text, font_size))
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, style: &TextStyle) {
        let tile = self.rasterize(text, font_size, style.color, style.alpha);
        if style.rotation_degrees.abs() < 1e-6 {
            self.composite_direct(&tile, x, y);
        } else {
            self.composite_rotated(&tile, x, y, style.rotation_degrees, style.pivot);
        }
    }
}

/// Source-over blend of one channel onto an opaque background.
fn blend_over(dst: u8, src: u8, alpha: f64) -> u8 {
    let blended = f64::from(src) * alpha + f64::from(dst) * (1.0 - alpha);
    blended.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_font_bytes_rejected() {
        let image = DecodedImage::new(10, 10, vec![0u8; 300]);
        let result = GlyphSurface::new(image, vec![0u8; 64]);
        assert!(matches!(result, Err(WatermarkError::FontUnreadable(_))));
    }

    #[test]
    fn test_blend_over_extremes() {
        assert_eq!(blend_over(0, 255, 1.0), 255);
        assert_eq!(blend_over(0, 255, 0.0), 0);
        assert_eq!(blend_over(200, 100, 0.0), 200);
    }

    #[test]
    fn test_blend_over_midpoint() {
        assert_eq!(blend_over(0, 255, 0.5), 128);
        assert_eq!(blend_over(100, 200, 0.5), 150);
    }
}
