//! Image resolution for export
//!
//! Every image on a page has to become an inline data URL before the page is
//! rasterized, so the rasterizer never performs I/O of its own. Remote images
//! are downloaded here; one that cannot be fetched or decoded fails the
//! export.

use crate::{ExportError, Result};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use teaser_model::{ImageSource, InlineImage};
use tracing::debug;

const USER_AGENT: &str = concat!("teaser-gen/", env!("CARGO_PKG_VERSION"));

/// Turns an image source into an href the rasterizer can load directly
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, source: &ImageSource) -> Result<String>;
}

fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves inline images and `file://` references from the local disk
///
/// Remote references are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalImageResolver;

impl ImageResolver for LocalImageResolver {
    fn resolve(&self, source: &ImageSource) -> Result<String> {
        match source {
            ImageSource::Inline(image) => embeddable_data_url(&image.data),
            ImageSource::Url(url) if is_remote(url) => Err(ExportError::RemoteImage {
                url: url.clone(),
                reason: "remote images are disabled".to_string(),
            }),
            ImageSource::Url(url) => {
                let Some(path) = url.strip_prefix("file://") else {
                    return Err(ExportError::UnsupportedImage(url.clone()));
                };
                let path = Path::new(path);
                let data = std::fs::read(path).map_err(|source| ExportError::ImageRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), bytes = data.len(), "Read image for export");
                embeddable_data_url(&data)
            }
        }
    }
}

/// Downloads http(s) images and resolves everything else locally
///
/// Uses the blocking reqwest client, so resolution must run off the async
/// runtime (export does, on the blocking pool).
#[derive(Debug, Clone)]
pub struct HttpImageResolver {
    timeout: Duration,
    use_proxy: bool,
}

impl HttpImageResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            use_proxy: true,
        }
    }

    /// Connect directly, ignoring proxy environment variables
    pub fn direct(mut self) -> Self {
        self.use_proxy = false;
        self
    }

    fn fetch(&self, url: &str) -> reqwest::Result<Vec<u8>> {
        // The blocking client owns a runtime; it is built and dropped on this thread
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);
        if !self.use_proxy {
            builder = builder.no_proxy();
        }
        let response = builder.build()?.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

impl ImageResolver for HttpImageResolver {
    fn resolve(&self, source: &ImageSource) -> Result<String> {
        let ImageSource::Url(url) = source else {
            return LocalImageResolver.resolve(source);
        };
        if !is_remote(url) {
            return LocalImageResolver.resolve(source);
        }

        let failed = |reason: String| ExportError::RemoteImage {
            url: url.clone(),
            reason,
        };
        let data = self.fetch(url).map_err(|e| failed(e.to_string()))?;
        debug!(url = %url, bytes = data.len(), "Fetched image for export");
        embeddable_data_url(&data).map_err(|e| failed(e.to_string()))
    }
}

/// Decode `data` to prove it is an image, and return it as a data URL
///
/// PNG, JPEG and GIF pass through unchanged. Other decodable formats are
/// re-encoded as PNG.
pub fn embeddable_data_url(data: &[u8]) -> Result<String> {
    let format = image::guess_format(data)?;
    let decoded = image::load_from_memory_with_format(data, format)?;

    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif => {
            Ok(InlineImage::new(format.to_mime_type(), data.to_vec()).to_data_url())
        }
        other => {
            debug!(format = ?other, "Re-encoding image as PNG");
            let mut png = Cursor::new(Vec::new());
            decoded.write_to(&mut png, ImageFormat::Png)?;
            Ok(InlineImage::new("image/png", png.into_inner()).to_data_url())
        }
    }
}
