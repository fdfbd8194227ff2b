//! Stroke state applied by the context when painting.

/// Stroke state of a [`Canvas2dContext`](crate::Canvas2dContext).
///
/// Caps and joins are fixed at the Canvas 2D defaults (butt caps, miter
/// joins with a limit of 10).
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current stroke color.
    pub stroke_style: tiny_skia::Color,
    /// Current line width.
    pub line_width: f32,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            stroke_style: tiny_skia::Color::BLACK,
            line_width: 1.0,
        }
    }
}
