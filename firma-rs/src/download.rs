//! Delivery of exported documents.

use crate::error::{FirmaError, FirmaResult};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A named file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Receives finished downloads.
pub trait DownloadSink {
    fn deliver(&self, download: &Download) -> FirmaResult<()>;
}

/// Writes each download into a directory under its own filename.
#[derive(Debug, Clone)]
pub struct FileDownload {
    dir: PathBuf,
}

impl FileDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a download with `filename` is written to.
    pub fn path_for(&self, filename: &str) -> FirmaResult<PathBuf> {
        check_filename(filename)?;
        Ok(self.dir.join(filename))
    }
}

impl DownloadSink for FileDownload {
    fn deliver(&self, download: &Download) -> FirmaResult<()> {
        let path = self.path_for(&download.filename)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, &download.bytes)?;
        log::info!(
            "wrote {} ({} bytes, {})",
            path.display(),
            download.bytes.len(),
            download.mime_type
        );
        Ok(())
    }
}

/// Keeps downloads in memory.
#[derive(Debug, Default)]
pub struct MemoryDownload {
    received: RefCell<Vec<Download>>,
}

impl MemoryDownload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.received.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.received.borrow().is_empty()
    }

    /// Remove and return everything received so far.
    pub fn take(&self) -> Vec<Download> {
        std::mem::take(&mut *self.received.borrow_mut())
    }
}

impl DownloadSink for MemoryDownload {
    fn deliver(&self, download: &Download) -> FirmaResult<()> {
        self.received.borrow_mut().push(download.clone());
        Ok(())
    }
}

/// A download filename is a single path component.
pub(crate) fn check_filename(filename: &str) -> FirmaResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
        || filename.contains('\0')
    {
        return Err(FirmaError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Download {
        Download {
            filename: "firma.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        }
    }

    #[test]
    fn test_check_filename() {
        assert!(check_filename("firma.pdf").is_ok());
        assert!(check_filename("firma..pdf").is_ok());
        for bad in ["", ".", "..", "../firma.pdf", "a/b.pdf", "a\\b.pdf"] {
            assert!(
                matches!(check_filename(bad), Err(FirmaError::InvalidFilename(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn test_memory_download() {
        let sink = MemoryDownload::new();
        assert!(sink.is_empty());
        sink.deliver(&sample()).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.take(), vec![sample()]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_file_download_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileDownload::new(tmp.path().join("nested"));
        sink.deliver(&sample()).unwrap();
        let written = std::fs::read(tmp.path().join("nested").join("firma.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.7");
    }

    #[test]
    fn test_file_download_rejects_path_in_name() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileDownload::new(tmp.path());
        let mut download = sample();
        download.filename = "../firma.pdf".to_string();
        assert!(matches!(
            sink.deliver(&download),
            Err(FirmaError::InvalidFilename(_))
        ));
    }
}
