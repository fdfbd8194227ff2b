//! PNG sources and their decoding into PDF image samples.

use crate::error::{PdfError, PdfResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Where the PNG to embed comes from.
#[derive(Debug, Clone, Copy)]
pub enum PngSource<'a> {
    /// A `data:image/png;base64,...` URL, as produced by `canvas.toDataURL()`.
    DataUrl(&'a str),
    /// Raw PNG file bytes.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a [u8]> for PngSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PngSource::Bytes(bytes)
    }
}

/// Decoded image samples ready to be written as an image XObject.
///
/// Color is stored as 8-bit RGB. Alpha becomes a separate DeviceGray soft
/// mask and is omitted when every pixel is opaque.
#[derive(Debug, Clone)]
pub(crate) struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

/// Split the payload out of a base64 PNG data URL.
pub(crate) fn data_url_payload(url: &str) -> PdfResult<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PdfError::InvalidDataUrl("missing `data:` scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| PdfError::InvalidDataUrl("missing `,` separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default();
    if !mime.eq_ignore_ascii_case("image/png") {
        return Err(PdfError::UnsupportedMimeType(mime.to_string()));
    }
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(PdfError::InvalidDataUrl(
            "only base64 encoded payloads are supported".to_string(),
        ));
    }

    Ok(STANDARD.decode(payload.trim())?)
}

pub(crate) fn decode_png(source: PngSource<'_>) -> PdfResult<DecodedImage> {
    let owned;
    let bytes = match source {
        PngSource::DataUrl(url) => {
            owned = data_url_payload(url)?;
            owned.as_slice()
        }
        PngSource::Bytes(bytes) => bytes,
    };

    let rgba = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PdfError::EmptyImage);
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }
    let alpha = if alpha.iter().all(|&a| a == 255) {
        None
    } else {
        Some(alpha)
    };

    log::debug!(
        "decoded {}x{} png (soft mask: {})",
        width,
        height,
        alpha.is_some()
    );

    Ok(DecodedImage {
        width,
        height,
        rgb,
        alpha,
    })
}
