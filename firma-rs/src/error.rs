use firma_canvas2d::Canvas2dError;
use firma_pdf::PdfError;
use thiserror::Error;

/// Result type alias using FirmaError.
pub type FirmaResult<T> = Result<T, FirmaError>;

#[derive(Debug, Error)]
pub enum FirmaError {
    /// The pad could not obtain a 2D context and is inert.
    #[error("2D drawing context is unavailable")]
    ContextUnavailable,

    #[error("Canvas error: {0}")]
    Canvas(#[from] Canvas2dError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid download filename `{0}`")]
    InvalidFilename(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
