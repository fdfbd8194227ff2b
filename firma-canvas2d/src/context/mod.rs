//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::CanvasColor;
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Canvas 2D rendering context.
pub struct Canvas2dContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Current path builder.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    /// Whether the path has a current point (lineTo on an empty path acts as moveTo).
    pub(crate) has_current_point: bool,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext with the specified dimensions.
    ///
    /// Fails with [`Canvas2dError::InvalidDimensions`] when either dimension is
    /// zero or larger than the maximum canvas size.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            path_builder: tiny_skia::PathBuilder::new(),
            has_current_point: false,
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Set the stroke style from a CSS color string.
    ///
    /// On error the previous style stays in place.
    pub fn set_stroke_style(&mut self, style: &str) -> Canvas2dResult<()> {
        self.state.stroke_style = style.parse::<CanvasColor>()?.into();
        Ok(())
    }

    /// Set the line width.
    /// Non-finite or non-positive values are ignored, as in browsers.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RectParams;

    #[test]
    fn test_new_context_defaults() {
        let ctx = Canvas2dContext::new(200, 150).unwrap();
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert_eq!(ctx.state.line_width, 1.0);
        assert_eq!(ctx.state.stroke_style, tiny_skia::Color::BLACK);
        // Canvas should be fully transparent
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
        assert!(ctx.is_blank());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas2dContext::new(0, 100),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(100, 0),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(MAX_DIMENSION + 1, 10),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_line_width_ignore_invalid() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_line_width(2.0);
        assert_eq!(ctx.state.line_width, 2.0);

        // Negative values are ignored (value preserved)
        ctx.set_line_width(-1.0);
        assert_eq!(ctx.state.line_width, 2.0);

        // Zero is ignored
        ctx.set_line_width(0.0);
        assert_eq!(ctx.state.line_width, 2.0);

        // Non-finite values are ignored
        ctx.set_line_width(f32::NAN);
        assert_eq!(ctx.state.line_width, 2.0);
        ctx.set_line_width(f32::INFINITY);
        assert_eq!(ctx.state.line_width, 2.0);
    }

    #[test]
    fn test_stroke_style_parse() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_stroke_style("#ff0000").unwrap();
        assert_eq!(
            ctx.state.stroke_style,
            tiny_skia::Color::from_rgba8(255, 0, 0, 255)
        );

        // Named colors go through the same parser
        ctx.set_stroke_style("blue").unwrap();
        assert_eq!(
            ctx.state.stroke_style,
            tiny_skia::Color::from_rgba8(0, 0, 255, 255)
        );

        // Invalid colors are reported and leave the previous style in place
        assert!(matches!(
            ctx.set_stroke_style("not-a-color"),
            Err(Canvas2dError::ColorParseError(_))
        ));
        assert_eq!(
            ctx.state.stroke_style,
            tiny_skia::Color::from_rgba8(0, 0, 255, 255)
        );
    }

    #[test]
    fn test_clear_rect_keeps_path() {
        // clearRect only touches pixels; the current path survives it.
        let mut ctx = Canvas2dContext::new(50, 50).unwrap();
        ctx.begin_path();
        ctx.move_to(5.0, 25.0);
        ctx.line_to(45.0, 25.0);
        ctx.stroke();
        ctx.clear_rect(&RectParams::full(50, 50));
        assert!(ctx.is_blank());
        assert!(ctx.has_current_point);

        ctx.stroke();
        assert!(!ctx.is_blank());
    }
}
