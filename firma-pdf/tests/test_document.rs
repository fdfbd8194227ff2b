use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use firma_pdf::{ImageRect, PageSize, PdfDocument, PdfError, PngSource};
use lopdf::content::Content;
use lopdf::{Document, Object};
use rstest::rstest;

fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    buf
}

fn image_streams(doc: &Document) -> Vec<&lopdf::Stream> {
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            Object::Stream(stream) => Some(stream),
            _ => None,
        })
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|o| o.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
        .collect()
}

fn first_cm(doc: &Document) -> Vec<f32> {
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let data = doc.get_page_content(page_id).unwrap();
    let content = Content::decode(&data).unwrap();
    let op = content
        .operations
        .iter()
        .find(|op| op.operator == "cm")
        .expect("cm operator");
    op.operands.iter().map(|o| o.as_float().unwrap()).collect()
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_single_page_with_image() {
    // 40x20 half-transparent red image
    let rgba: Vec<u8> = [255, 0, 0, 128].repeat(40 * 20);
    let png = encode_png(40, 20, &rgba);

    let mut doc = PdfDocument::new();
    let page = doc.add_page(PageSize::A4);
    let image = doc.embed_png(PngSource::Bytes(&png)).unwrap();
    assert_eq!((image.width(), image.height()), (40, 20));

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

    let bytes = doc.save();
    assert!(bytes.starts_with(b"%PDF-"));

    let parsed = Document::load_mem(&bytes).unwrap();
    let pages = parsed.get_pages();
    assert_eq!(pages.len(), 1);

    // MediaBox matches A4
    let page_id = *pages.values().next().unwrap();
    let page_dict = parsed.get_dictionary(page_id).unwrap();
    let media_box: Vec<f32> = page_dict
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_float().unwrap())
        .collect();
    assert_close(media_box[2], 595.28);
    assert_close(media_box[3], 841.89);

    // Color image plus its soft mask
    let images = image_streams(&parsed);
    assert_eq!(images.len(), 2);
    let color = images
        .iter()
        .find(|s| s.dict.get(b"SMask").is_ok())
        .expect("color image with soft mask");
    assert_eq!(color.dict.get(b"Width").unwrap().as_i64().unwrap(), 40);
    assert_eq!(color.dict.get(b"Height").unwrap().as_i64().unwrap(), 20);
    assert_eq!(color.content.len(), 40 * 20 * 3);

    // Placement: scaled to half size, 100pt from the left, 100pt below the top
    let cm = first_cm(&parsed);
    assert_close(cm[0], 20.0);
    assert_close(cm[3], 10.0);
    assert_close(cm[4], 100.0);
    assert_close(cm[5], 841.89 - 10.0 - 100.0);
}

#[test]
fn test_opaque_image_has_no_soft_mask() {
    let rgba: Vec<u8> = [0, 0, 0, 255].repeat(4 * 4);
    let png = encode_png(4, 4, &rgba);

    let mut doc = PdfDocument::new();
    let page = doc.add_page(PageSize::LETTER);
    let image = doc.embed_png(PngSource::Bytes(&png)).unwrap();
    doc.draw_image(
        page,
        &image,
        ImageRect {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        },
    )
    .unwrap();

    let parsed = Document::load_mem(&doc.save()).unwrap();
    let images = image_streams(&parsed);
    assert_eq!(images.len(), 1);
    assert!(images[0].dict.get(b"SMask").is_err());
}

#[test]
fn test_embed_from_data_url() {
    let rgba: Vec<u8> = [0, 0, 0, 0].repeat(10 * 6);
    let png = encode_png(10, 6, &rgba);
    let url = format!("data:image/png;base64,{}", STANDARD.encode(&png));

    let mut doc = PdfDocument::new();
    let image = doc.embed_png(PngSource::DataUrl(&url)).unwrap();
    assert_eq!((image.width(), image.height()), (10, 6));
}

#[rstest]
#[case("data:text/plain;base64,AAAA")]
#[case("data:image/png,AAAA")]
#[case("not a url")]
fn test_embed_rejects_bad_data_urls(#[case] url: &str) {
    let mut doc = PdfDocument::new();
    let err = doc.embed_png(PngSource::DataUrl(url)).unwrap_err();
    assert!(matches!(
        err,
        PdfError::InvalidDataUrl(_) | PdfError::UnsupportedMimeType(_)
    ));
}

#[test]
fn test_producer_is_written() {
    let mut doc = PdfDocument::new();
    doc.add_page(PageSize::A4);
    doc.set_producer("firma test");
    let bytes = doc.save();
    let parsed = Document::load_mem(&bytes).unwrap();
    let info_ref = parsed
        .trailer
        .get(b"Info")
        .unwrap()
        .as_reference()
        .unwrap();
    let info = parsed.get_dictionary(info_ref).unwrap();
    let producer = info.get(b"Producer").unwrap().as_str().unwrap();
    assert_eq!(producer, b"firma test");
}
