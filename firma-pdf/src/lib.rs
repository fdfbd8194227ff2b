//! Minimal PDF document builder for embedding PNG images.
//!
//! Exposes the handful of operations a signature export needs: create a
//! document, add a page, embed a PNG (from raw bytes or a `data:` URL), read
//! the page height, draw the image into a rectangle and serialize to bytes.
//! Documents are written with `pdf-writer`.
//!
//! ```rust,ignore
//! use firma_pdf::{ImageRect, PageSize, PdfDocument, PngSource};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(PageSize::A4);
//! let image = doc.embed_png(PngSource::DataUrl(&data_url))?;
//! let (width, height) = image.scale(0.5);
//! let y = doc.page_height(page)? - height - 100.0;
//! doc.draw_image(page, &image, ImageRect { x: 100.0, y, width, height })?;
//! let bytes = doc.save();
//! ```

mod document;
mod error;
mod png_source;

pub use document::{EmbeddedImage, ImageRect, PageIndex, PageSize, PdfDocument};
pub use error::{PdfError, PdfResult};
pub use png_source::PngSource;

/// MIME type of the documents produced by [`PdfDocument::save`].
pub const PDF_MIME_TYPE: &str = "application/pdf";
