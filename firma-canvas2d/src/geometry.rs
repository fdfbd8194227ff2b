//! Parameter structs and backend-neutral value types.

use crate::error::Canvas2dError;
use std::str::FromStr;

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    /// Rectangle covering a whole `width` x `height` canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

/// A backend-neutral RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const BLACK: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for CanvasColor {
    type Err = Canvas2dError;

    /// Parse any CSS color (`#000`, `black`, `rgb(0 0 0)`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Self::from_rgba8(r, g, b, a))
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_colors() {
        assert_eq!("#000000".parse::<CanvasColor>().unwrap(), CanvasColor::BLACK);
        assert_eq!("black".parse::<CanvasColor>().unwrap(), CanvasColor::BLACK);
        assert_eq!(
            "rgba(255, 0, 0, 0.5)".parse::<CanvasColor>().unwrap(),
            CanvasColor::from_rgba8(255, 0, 0, 128)
        );
        assert!(matches!(
            "nope".parse::<CanvasColor>(),
            Err(Canvas2dError::ColorParseError(_))
        ));
    }
}
