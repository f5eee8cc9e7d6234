//! Error types for export operations

use crate::pdf::PdfError;
use crate::ExportFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote image {url} could not be embedded: {reason}")]
    RemoteImage { url: String, reason: String },

    #[error("Unsupported image reference: {0}")]
    UnsupportedImage(String),

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image could not be decoded: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Page SVG could not be parsed: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ExportError {
    /// The blocking notice shown to the user
    ///
    /// Every failure maps to the same generic message for the format; the
    /// detail only goes to the log.
    pub fn user_notice(&self, format: ExportFormat) -> &'static str {
        format.failure_notice()
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
