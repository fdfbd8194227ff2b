//! In-memory document model and serialization with pdf-writer.

use crate::error::{PdfError, PdfResult};
use crate::png_source::{decode_png, DecodedImage, PngSource};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, TextStr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default `/Producer` entry of the document information dictionary.
const DEFAULT_PRODUCER: &str = concat!("firma-pdf ", env!("CARGO_PKG_VERSION"));

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4, the size of a page added without explicit dimensions.
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    /// US Letter.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Placement of an image on a page, in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Index of a page within a [`PdfDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Handle to an image embedded in a [`PdfDocument`].
///
/// Only valid for the document that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedImage {
    index: usize,
    width: u32,
    height: u32,
}

impl EmbeddedImage {
    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions after scaling by `factor`, one pixel mapping to one point.
    pub fn scale(&self, factor: f32) -> (f32, f32) {
        (self.width as f32 * factor, self.height as f32 * factor)
    }
}

#[derive(Debug, Clone)]
struct PageSpec {
    size: PageSize,
    draws: Vec<(usize, ImageRect)>,
}

/// A PDF document under construction.
///
/// Pages and images are collected in memory and written out in one pass by
/// [`PdfDocument::save`].
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<PageSpec>,
    images: Vec<DecodedImage>,
    producer: String,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            images: Vec::new(),
            producer: DEFAULT_PRODUCER.to_string(),
        }
    }

    /// Override the `/Producer` written to the document information dictionary.
    pub fn set_producer(&mut self, producer: impl Into<String>) {
        self.producer = producer.into();
    }

    /// Append a blank page.
    pub fn add_page(&mut self, size: PageSize) -> PageIndex {
        self.pages.push(PageSpec {
            size,
            draws: Vec::new(),
        });
        PageIndex(self.pages.len() - 1)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Dimensions of a page.
    pub fn page_size(&self, page: PageIndex) -> PdfResult<PageSize> {
        self.pages
            .get(page.0)
            .map(|p| p.size)
            .ok_or(PdfError::PageOutOfRange(page.0))
    }

    /// Height of a page in points.
    pub fn page_height(&self, page: PageIndex) -> PdfResult<f32> {
        Ok(self.page_size(page)?.height)
    }

    /// Decode a PNG and register it as an image resource of this document.
    pub fn embed_png<'a>(&mut self, source: impl Into<PngSource<'a>>) -> PdfResult<EmbeddedImage> {
        let decoded = decode_png(source.into())?;
        let handle = EmbeddedImage {
            index: self.images.len(),
            width: decoded.width,
            height: decoded.height,
        };
        self.images.push(decoded);
        Ok(handle)
    }

    /// Paint an embedded image into `rect` on `page`.
    pub fn draw_image(
        &mut self,
        page: PageIndex,
        image: &EmbeddedImage,
        rect: ImageRect,
    ) -> PdfResult<()> {
        if image.index >= self.images.len() {
            return Err(PdfError::UnknownImage(image.index));
        }
        let page_spec = self
            .pages
            .get_mut(page.0)
            .ok_or(PdfError::PageOutOfRange(page.0))?;
        log::debug!(
            "draw image {} on page {} at {} {} {}x{}",
            image.index,
            page.0,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        page_spec.draws.push((image.index, rect));
        Ok(())
    }

    /// Serialize the document to PDF bytes.
    pub fn save(&self) -> Vec<u8> {
        // Allocate the indirect reference IDs
        let mut next_ref = Ref::new(1);
        let catalog_id = next_ref.bump();
        let page_tree_id = next_ref.bump();
        let info_id = next_ref.bump();

        let mut image_refs: Vec<(Ref, Option<Ref>)> = Vec::with_capacity(self.images.len());
        for image in &self.images {
            let image_id = next_ref.bump();
            let mask_id = image.alpha.as_ref().map(|_| next_ref.bump());
            image_refs.push((image_id, mask_id));
        }

        let mut page_refs: Vec<(Ref, Ref)> = Vec::with_capacity(self.pages.len());
        for _ in &self.pages {
            let page_id = next_ref.bump();
            let content_id = next_ref.bump();
            page_refs.push((page_id, content_id));
        }

        // Define names.
        let image_names: Vec<String> = (1..=self.images.len()).map(|i| format!("Im{i}")).collect();

        // Start writing a PDF.
        let mut writer = Pdf::new();
        writer.catalog(catalog_id).pages(page_tree_id);
        writer
            .pages(page_tree_id)
            .kids(page_refs.iter().map(|(page_id, _)| *page_id))
            .count(self.pages.len() as i32);
        writer
            .document_info(info_id)
            .producer(TextStr(&self.producer));

        // ## Image XObjects, each with an optional DeviceGray soft mask for alpha
        for (image, (image_id, mask_id)) in self.images.iter().zip(&image_refs) {
            let mut xobject = writer.image_xobject(*image_id, &image.rgb);
            xobject.width(image.width as i32);
            xobject.height(image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            if let Some(mask_id) = mask_id {
                xobject.s_mask(*mask_id);
            }
            xobject.finish();

            if let (Some(mask_id), Some(alpha)) = (mask_id, &image.alpha) {
                let mut mask = writer.image_xobject(*mask_id, alpha);
                mask.width(image.width as i32);
                mask.height(image.height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask.finish();
            }
        }

        // ## Pages
        for (page_spec, (page_id, content_id)) in self.pages.iter().zip(&page_refs) {
            let mut page = writer.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, page_spec.size.width, page_spec.size.height));
            page.parent(page_tree_id);
            page.contents(*content_id);

            // Setup the page's resources so images can be referenced in the content stream
            let used: BTreeSet<usize> = page_spec.draws.iter().map(|(index, _)| *index).collect();
            let mut resources = page.resources();
            let mut x_objects = resources.x_objects();
            for index in used {
                x_objects.pair(Name(image_names[index].as_bytes()), image_refs[index].0);
            }
            x_objects.finish();
            resources.finish();
            page.finish();

            // The image XObject occupies the unit square, so scale it up to the
            // target size and translate it into place
            let mut content = Content::new();
            for (index, rect) in &page_spec.draws {
                content
                    .save_state()
                    .transform([rect.width, 0.0, 0.0, rect.height, rect.x, rect.y])
                    .x_object(Name(image_names[*index].as_bytes()))
                    .restore_state();
            }
            writer.stream(*content_id, &content.finish());
        }

        // Generate the final PDF file's contents
        writer.finish()
    }
}
