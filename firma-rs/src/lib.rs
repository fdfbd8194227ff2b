#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod download;
pub mod error;
pub mod event;
pub mod export;
pub mod pad;
pub mod target;

pub use config::{ExportLayout, PadConfig, PageOffset, DEFAULT_FILENAME};
pub use download::{Download, DownloadSink, FileDownload, MemoryDownload};
pub use error::{FirmaError, FirmaResult};
pub use event::{parse_event_script, EventKind, InputEvent, PointerInput, TouchInput, TouchPoint};
pub use export::build_signature_pdf;
pub use pad::{SignaturePad, StrokePoint};
pub use target::{EventTarget, ListenerId, Mount};

pub use firma_canvas2d;
pub use firma_pdf;
