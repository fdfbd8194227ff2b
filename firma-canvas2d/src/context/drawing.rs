//! Stroke and clear operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use tiny_skia::Transform;

/// Canvas 2D default miter limit.
const MITER_LIMIT: f32 = 10.0;

impl Canvas2dContext {
    /// Stroke the current path.
    ///
    /// The path is kept, so stroking again after appending a segment repaints
    /// the whole path, matching browser behavior.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        // Clone the path builder so we don't consume it - more segments may follow
        let path = self.path_builder.clone().finish();

        if let Some(path) = path {
            let stroke = tiny_skia::Stroke {
                width: self.state.line_width,
                line_cap: tiny_skia::LineCap::Butt,
                line_join: tiny_skia::LineJoin::Miter,
                miter_limit: MITER_LIMIT,
                dash: None,
            };

            let paint = self.stroke_paint();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    /// Clear a rectangle (set pixels to transparent).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let rect = match tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        {
            Some(rect) => rect,
            None => return,
        };

        let paint = tiny_skia::Paint {
            blend_mode: tiny_skia::BlendMode::Clear,
            ..Default::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(self.state.stroke_style);
        paint
    }
}
