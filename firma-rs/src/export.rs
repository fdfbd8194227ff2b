use crate::config::ExportLayout;
use crate::error::FirmaResult;
use firma_pdf::{ImageRect, PageSize, PdfDocument, PngSource};

impl ExportLayout {
    /// Rectangle of an image of `width` x `height` pixels on a page of
    /// `page_height` points.
    ///
    /// PDF user space grows upwards, so the top margin is measured down from
    /// the page top: `y = page_height - scaled_height - top_margin`.
    pub fn place(&self, width: u32, height: u32, page_height: f32) -> ImageRect {
        let scaled_width = width as f32 * self.scale;
        let scaled_height = height as f32 * self.scale;
        ImageRect {
            x: self.origin_x,
            y: page_height - scaled_height - self.top_margin,
            width: scaled_width,
            height: scaled_height,
        }
    }
}

/// Build a one-page PDF showing the PNG in `data_url` placed by `layout`.
pub fn build_signature_pdf(
    data_url: &str,
    page_size: PageSize,
    layout: &ExportLayout,
) -> FirmaResult<Vec<u8>> {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(page_size);
    let image = doc.embed_png(PngSource::DataUrl(data_url))?;
    let rect = layout.place(image.width(), image.height(), doc.page_height(page)?);
    doc.draw_image(page, &image, rect)?;

    let bytes = doc.save();
    log::info!(
        "built signature PDF: {}x{} image at ({}, {}), {} bytes",
        image.width(),
        image.height(),
        rect.x,
        rect.y,
        bytes.len()
    );
    Ok(bytes)
}
