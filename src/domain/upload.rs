//! Reference to the MRI image chosen by the user.

use std::path::{Path, PathBuf};

/// File name sent when the path has no final component.
const FALLBACK_FILE_NAME: &str = "upload";

/// Content type sent for unrecognised extensions.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// An image selected for upload.
///
/// Only the path is held; bytes are read when the request is built.
/// No format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    path: PathBuf,
}

impl UploadedImage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name reported in the multipart part.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
    }

    /// Content type of the image, from its file extension.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        let extension = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            Some("webp") => "image/webp",
            Some("tif" | "tiff") => "image/tiff",
            Some("dcm") => "application/dicom",
            _ => FALLBACK_MIME_TYPE,
        }
    }

    /// Read the image bytes.
    ///
    /// # Errors
    /// Returns the underlying IO error if the file cannot be read.
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}
