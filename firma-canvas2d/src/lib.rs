//! Headless Canvas 2D drawing surface built on tiny-skia.
//!
//! This crate implements the slice of the Canvas 2D API that a signature
//! surface relies on, without a browser or JavaScript runtime:
//! - stroke style and line width (butt caps, miter joins)
//! - path building (`beginPath`, `moveTo`, `lineTo`)
//! - `stroke` and `clearRect`
//! - image data readback, PNG and `data:` URL export
//!
//! # Example
//!
//! ```rust,ignore
//! use firma_canvas2d::Canvas2dContext;
//!
//! let mut ctx = Canvas2dContext::new(400, 200)?;
//! ctx.set_stroke_style("#000000")?;
//! ctx.set_line_width(2.0);
//! ctx.begin_path();
//! ctx.move_to(10.0, 10.0);
//! ctx.line_to(50.0, 10.0);
//! ctx.stroke();
//! let url = ctx.to_data_url()?;
//! ```

mod context;
mod drawing_state;
mod error;
mod geometry;

// Re-export public API
pub use context::Canvas2dContext;
pub use drawing_state::DrawingState;
pub use error::{Canvas2dError, Canvas2dResult};
pub use geometry::{CanvasColor, RectParams};

/// MIME type of the images produced by [`Canvas2dContext::to_data_url`].
pub const PNG_MIME_TYPE: &str = "image/png";
