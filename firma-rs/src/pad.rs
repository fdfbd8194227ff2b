//! The signature pad: a drawing surface fed by pointer and touch events.

use crate::config::{PadConfig, PageOffset};
use crate::download::{Download, DownloadSink};
use crate::error::{FirmaError, FirmaResult};
use crate::event::{EventKind, InputEvent, PointerInput, TouchInput};
use crate::export::build_signature_pdf;
use crate::target::{EventTarget, Mount};
use firma_canvas2d::{Canvas2dContext, RectParams};
use firma_pdf::PDF_MIME_TYPE;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// A point of the signature in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Captures a handwritten signature and exports it as a PDF.
///
/// Strokes are rendered straight onto the canvas as they arrive; the canvas
/// is the only representation export reads from. The recorded points are
/// kept for inspection and are cleared together with the canvas.
///
/// If the canvas context cannot be created the pad is inert: events and
/// [`reset`](Self::reset) do nothing and exports fail with
/// [`FirmaError::ContextUnavailable`].
pub struct SignaturePad {
    config: PadConfig,
    context: Option<Canvas2dContext>,
    points: Vec<StrokePoint>,
    drawing: bool,
}

impl SignaturePad {
    pub fn new(config: PadConfig) -> Self {
        let context = match Canvas2dContext::new(config.width, config.height) {
            Ok(mut ctx) => {
                ctx.set_line_width(config.line_width);
                if let Err(e) = ctx.set_stroke_style(&config.stroke_style) {
                    log::warn!("keeping default stroke style: {}", e);
                }
                Some(ctx)
            }
            Err(e) => {
                log::error!("could not get a 2D context for the signature pad: {}", e);
                None
            }
        };

        Self {
            config,
            context,
            points: Vec::new(),
            drawing: false,
        }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// True when the pad has no drawing context.
    pub fn is_inert(&self) -> bool {
        self.context.is_none()
    }

    /// True between a press and the next release.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn canvas(&self) -> Option<&Canvas2dContext> {
        self.context.as_ref()
    }

    pub fn page_offset(&self) -> PageOffset {
        self.config.offset
    }

    /// Move the canvas on the page. Affects events handled afterwards.
    pub fn set_page_offset(&mut self, offset: PageOffset) {
        self.config.offset = offset;
    }

    pub fn is_blank(&self) -> bool {
        self.context.as_ref().map_or(true, |ctx| ctx.is_blank())
    }

    fn to_canvas_point(&self, client_x: f32, client_y: f32) -> StrokePoint {
        StrokePoint::new(
            client_x - self.config.offset.left,
            client_y - self.config.offset.top,
        )
    }

    fn start_stroke(&mut self, client_x: f32, client_y: f32) {
        let point = self.to_canvas_point(client_x, client_y);
        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        ctx.begin_path();
        ctx.move_to(point.x, point.y);
        self.points.push(point);
        self.drawing = true;
    }

    fn extend_stroke(&mut self, client_x: f32, client_y: f32) {
        if !self.drawing {
            return;
        }
        let point = self.to_canvas_point(client_x, client_y);
        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        ctx.line_to(point.x, point.y);
        ctx.stroke();
        self.points.push(point);
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
    }

    pub fn on_pointer_down(&mut self, input: &PointerInput) {
        self.start_stroke(input.client_x, input.client_y);
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) {
        self.extend_stroke(input.client_x, input.client_y);
    }

    pub fn on_pointer_up(&mut self) {
        self.end_stroke();
    }

    /// Only the first touch point is used; a touch without points is ignored.
    pub fn on_touch_start(&mut self, input: &TouchInput) {
        if let Some(touch) = input.first_touch() {
            self.start_stroke(touch.client_x, touch.client_y);
        }
    }

    pub fn on_touch_move(&mut self, input: &TouchInput) {
        if let Some(touch) = input.first_touch() {
            self.extend_stroke(touch.client_x, touch.client_y);
        }
    }

    pub fn on_touch_end(&mut self) {
        self.end_stroke();
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(input) => self.on_pointer_down(input),
            InputEvent::PointerMove(input) => self.on_pointer_move(input),
            InputEvent::PointerUp(_) => self.on_pointer_up(),
            InputEvent::TouchStart(input) => self.on_touch_start(input),
            InputEvent::TouchMove(input) => self.on_touch_move(input),
            InputEvent::TouchEnd(_) => self.on_touch_end(),
        }
    }

    /// Erase the drawing: clears every pixel, the current path and the points.
    ///
    /// The in-progress flag is left alone, so a stroke that is still held
    /// continues from the next move.
    pub fn reset(&mut self) {
        let Some(ctx) = self.context.as_mut() else {
            log::debug!("reset ignored, pad is inert");
            return;
        };
        let full = RectParams::full(ctx.width(), ctx.height());
        ctx.clear_rect(&full);
        ctx.begin_path();
        self.points.clear();
        log::debug!("signature pad cleared");
    }

    fn context(&self) -> FirmaResult<&Canvas2dContext> {
        self.context.as_ref().ok_or(FirmaError::ContextUnavailable)
    }

    /// The canvas as PNG bytes.
    pub fn to_png(&self) -> FirmaResult<Vec<u8>> {
        Ok(self.context()?.to_png(None)?)
    }

    /// The canvas as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> FirmaResult<String> {
        Ok(self.context()?.to_data_url()?)
    }

    /// Render the current canvas into a one-page PDF.
    pub async fn export_document(&self) -> FirmaResult<Vec<u8>> {
        let data_url = self.to_data_url()?;
        let page_size = self.config.page_size;
        let layout = self.config.layout;

        let bytes = tokio::task::spawn_blocking(move || {
            build_signature_pdf(&data_url, page_size, &layout)
        })
        .await??;
        Ok(bytes)
    }

    /// Export the PDF and hand it to `sink` under the configured filename.
    pub async fn download_pdf(&self, sink: &dyn DownloadSink) -> FirmaResult<Download> {
        let bytes = self.export_document().await?;
        let download = Download {
            filename: self.config.filename.clone(),
            mime_type: PDF_MIME_TYPE.to_string(),
            bytes,
        };
        sink.deliver(&download)?;
        Ok(download)
    }

    /// Register handlers for every input event kind on `target`.
    ///
    /// The handlers hold a weak reference, so a mounted pad can still be
    /// dropped. Events that arrive while the pad is borrowed elsewhere are
    /// dropped with a warning.
    pub fn mount(pad: &Rc<RefCell<Self>>, target: &EventTarget) -> Mount {
        let ids = EventKind::ALL
            .iter()
            .map(|&kind| {
                let pad = Rc::downgrade(pad);
                target.add_event_listener(kind, move |event| {
                    let Some(pad) = pad.upgrade() else {
                        return;
                    };
                    match pad.try_borrow_mut() {
                        Ok(mut pad) => pad.handle_event(event),
                        Err(_) => log::warn!("signature pad busy, dropped {} event", kind),
                    };
                })
            })
            .collect();
        Mount::new(target, ids)
    }
}
