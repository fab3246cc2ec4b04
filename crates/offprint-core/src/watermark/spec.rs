//! Watermark settings and color parsing.

use super::WatermarkError;
use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Parse a hex color string into RGB components.
///
/// Supports both #RGB and #RRGGBB formats.
pub fn parse_hex_color(hex: &str) -> Result<Color, WatermarkError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| WatermarkError::InvalidColor(format!("{hex}: must start with '#'")))?;

    // The byte-offset slicing below requires single-byte characters.
    if !digits.is_ascii() {
        return Err(WatermarkError::InvalidColor(format!(
            "{hex}: invalid hex digit"
        )));
    }

    let digit = |range: std::ops::Range<usize>| -> Result<u8, WatermarkError> {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| WatermarkError::InvalidColor(format!("{hex}: invalid hex digit")))
    };

    match digits.len() {
        // #RGB: each digit doubled, 0xF -> 0xFF
        3 => Ok(Color::new(
            digit(0..1)? * 17,
            digit(1..2)? * 17,
            digit(2..3)? * 17,
        )),
        6 => Ok(Color::new(digit(0..2)?, digit(2..4)?, digit(4..6)?)),
        n => Err(WatermarkError::InvalidColor(format!(
            "{hex}: must be #RGB or #RRGGBB, got {n} digits"
        ))),
    }
}

/// The nine named single-placement positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Where watermark instances go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Placement {
    /// A single instance at a named anchor.
    Anchor { anchor: Anchor },
    /// A repeating grid. Spacing is a percentage of the base tile step.
    Tiled { spacing_percent: f64 },
}

/// Settings for one watermark render. Immutable per call: the render is a
/// pure function of the source pixels and this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkSpec {
    pub text: String,
    pub font_size: f64,
    /// 0 to 100.
    pub opacity_percent: f64,
    /// Clockwise, applied about the placement pivot.
    pub rotation_degrees: f64,
    /// Hex string, #RGB or #RRGGBB.
    pub color: String,
    pub placement: Placement,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 24.0,
            opacity_percent: 50.0,
            rotation_degrees: 0.0,
            color: "#ffffff".to_string(),
            placement: Placement::Anchor {
                anchor: Anchor::BottomRight,
            },
        }
    }
}

impl WatermarkSpec {
    /// Check ranges and parse the color.
    pub fn validate(&self) -> Result<Color, WatermarkError> {
        if !(self.font_size > 0.0) {
            return Err(WatermarkError::InvalidFontSize(self.font_size));
        }
        if !(0.0..=100.0).contains(&self.opacity_percent) {
            return Err(WatermarkError::InvalidOpacity(self.opacity_percent));
        }
        if let Placement::Tiled { spacing_percent } = self.placement {
            if !(spacing_percent > 0.0) {
                return Err(WatermarkError::InvalidTileSpacing(spacing_percent));
            }
        }
        parse_hex_color(&self.color)
    }
}
