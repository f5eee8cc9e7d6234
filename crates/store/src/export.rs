//! Export of a rendered page to PDF or PNG
//!
//! The whole output is produced in memory first. Only then is it written to
//! a temporary file next to the destination and renamed into place, so a
//! failed export never leaves a partial file behind.

use crate::pdf::{write_image_pdf, DocumentInfo, RgbImage};
use crate::{
    export_file_name, ExportError, ExportFormat, ExportSettings, HttpImageResolver,
    ImageResolver, LocalImageResolver, RasterPage, Rasterizer, Result,
};
use render_model::RenderPage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// A completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub bytes: usize,
}

#[derive(Clone)]
pub struct Exporter {
    settings: ExportSettings,
    rasterizer: Rasterizer,
    resolver: Arc<dyn ImageResolver>,
}

impl Exporter {
    /// Exporter with system fonts, fetching remote images unless disabled
    pub fn new(settings: ExportSettings) -> Self {
        let rasterizer = Rasterizer::new(&settings);
        let resolver: Arc<dyn ImageResolver> = if settings.fetch_remote_images {
            Arc::new(HttpImageResolver::new(Duration::from_secs(
                settings.image_timeout_secs,
            )))
        } else {
            Arc::new(LocalImageResolver)
        };
        Self::with_parts(settings, rasterizer, resolver)
    }

    pub fn with_parts(
        settings: ExportSettings,
        rasterizer: Rasterizer,
        resolver: Arc<dyn ImageResolver>,
    ) -> Self {
        Self {
            settings,
            rasterizer,
            resolver,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Where an export of `company_name` in `format` is written
    pub fn destination(&self, company_name: &str, format: ExportFormat) -> PathBuf {
        self.settings
            .output_dir
            .join(export_file_name(company_name, format))
    }

    pub fn rasterize(&self, page: &RenderPage) -> Result<RasterPage> {
        self.rasterizer.rasterize(page, self.resolver.as_ref())
    }

    /// Produce the file contents without touching the disk
    pub fn encode(
        &self,
        page: &RenderPage,
        company_name: &str,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        let raster = self.rasterize(page)?;
        match format {
            ExportFormat::Png => raster.encode_png(),
            ExportFormat::Pdf => {
                let image = RgbImage::new(raster.width(), raster.height(), raster.to_rgb());
                let mut info = DocumentInfo::teaser(company_name);
                info.author = self.settings.author.clone();
                Ok(write_image_pdf(&image, &info, self.settings.compress, Vec::new())?)
            }
        }
    }

    /// Render, encode and write the export for `company_name`
    pub fn export(
        &self,
        page: &RenderPage,
        company_name: &str,
        format: ExportFormat,
    ) -> Result<ExportOutput> {
        let result = self.encode(page, company_name, format).and_then(|bytes| {
            let path = self.destination(company_name, format);
            write_atomically(&path, &bytes)?;
            Ok(ExportOutput {
                path,
                format,
                bytes: bytes.len(),
            })
        });

        match &result {
            Ok(output) => info!(
                path = %output.path.display(),
                format = %format,
                bytes = output.bytes,
                "Export complete"
            ),
            Err(e) => error!(format = %format, error = %e, "Export failed"),
        }
        result
    }

    /// Run [`Exporter::export`] on the blocking thread pool
    pub async fn export_async(
        &self,
        page: RenderPage,
        company_name: String,
        format: ExportFormat,
    ) -> Result<ExportOutput> {
        let exporter = self.clone();
        let joined =
            tokio::task::spawn_blocking(move || exporter.export(&page, &company_name, format))
                .await;
        match joined {
            Ok(result) => result,
            Err(e) => {
                error!(format = %format, error = %e, "Export task failed");
                Err(ExportError::Task(e))
            }
        }
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| ExportError::Io(e.error))?;
    Ok(())
}
