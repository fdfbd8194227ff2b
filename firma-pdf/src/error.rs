//! Error types for firma-pdf.

use thiserror::Error;

/// Result type alias using PdfError.
pub type PdfResult<T> = Result<T, PdfError>;

/// Errors that can occur while building a PDF document.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The string is not a `data:` URL with a base64 payload.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The data URL carries something other than a PNG.
    #[error("Unsupported image type `{0}`, expected image/png")]
    UnsupportedMimeType(String),

    /// The base64 payload could not be decoded.
    #[error("Failed to decode base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bytes are not a decodable PNG.
    #[error("Failed to decode PNG image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Images must have at least one pixel.
    #[error("Image has zero width or height")]
    EmptyImage,

    /// Page index does not belong to this document.
    #[error("No page at index {0}")]
    PageOutOfRange(usize),

    /// Image handle does not belong to this document.
    #[error("No embedded image with index {0}")]
    UnknownImage(usize),
}
