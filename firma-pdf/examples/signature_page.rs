use firma_pdf::{ImageRect, PageSize, PdfDocument, PngSource};
use std::fs;

/// Writes target/signature_page.pdf containing a PNG given on the command line.
fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("usage: signature_page <image.png>");
    let png = fs::read(&path).unwrap();

    let mut doc = PdfDocument::new();
    let page = doc.add_page(PageSize::A4);
    let image = doc.embed_png(PngSource::Bytes(&png)).unwrap();
    let (width, height) = image.scale(0.5);
    let y = doc.page_height(page).unwrap() - height - 100.0;
    doc.draw_image(
        page,
        &image,
        ImageRect {
            x: 100.0,
            y,
            width,
            height,
        },
    )
    .unwrap();

    fs::write("target/signature_page.pdf", doc.save()).unwrap();
}
