//! Export settings
//!
//! Settings are read from a JSON file at startup and never written back.
//! Missing keys take their defaults, so a partial file is valid.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default raster density relative to the CSS pixel grid
pub const DEFAULT_SCALE: f64 = 2.0;

/// Default DPI used when resolving absolute SVG units
pub const DEFAULT_DPI: f64 = 96.0;

/// Font family used for text whose family is not installed
pub const DEFAULT_FALLBACK_FONT: &str = "sans-serif";

/// Default time allowed for fetching one remote image
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    /// Directory the exported files are written to
    pub output_dir: PathBuf,
    /// Raster density multiplier
    pub scale: f64,
    pub dpi: f64,
    /// Flate-compress PDF streams
    pub compress: bool,
    /// Written to the PDF document info when set
    pub author: Option<String>,
    pub fallback_font_family: String,
    /// Download http(s) images; when off they fail the export
    pub fetch_remote_images: bool,
    pub image_timeout_secs: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            scale: DEFAULT_SCALE,
            dpi: DEFAULT_DPI,
            compress: true,
            author: None,
            fallback_font_family: DEFAULT_FALLBACK_FONT.to_string(),
            fetch_remote_images: true,
            image_timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
        }
    }
}

impl ExportSettings {
    /// Load settings from `path`, or return defaults if the file doesn't exist
    ///
    /// A file that cannot be parsed is logged and replaced by defaults; only
    /// read failures other than "not found" are errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_or_default(path, &content))
    }

    /// Async variant of [`ExportSettings::load`]
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse_or_default(path, &content))
    }

    fn parse_or_default(path: &Path, content: &str) -> Self {
        match serde_json::from_str::<ExportSettings>(content) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    "Failed to parse export settings, using defaults: {}",
                    e
                );
                Self::default()
            }
        }
    }

    /// Replace out-of-range numbers with their defaults
    fn sanitized(mut self) -> Self {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            warn!(scale = self.scale, "Invalid export scale, using default");
            self.scale = DEFAULT_SCALE;
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            warn!(dpi = self.dpi, "Invalid export DPI, using default");
            self.dpi = DEFAULT_DPI;
        }
        if self.image_timeout_secs == 0 {
            warn!("Image timeout of zero, using default");
            self.image_timeout_secs = DEFAULT_IMAGE_TIMEOUT_SECS;
        }
        if self.fallback_font_family.trim().is_empty() {
            self.fallback_font_family = DEFAULT_FALLBACK_FONT.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = ExportSettings::default();
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(settings.scale, 2.0);
        assert_eq!(settings.dpi, 96.0);
        assert!(settings.compress);
        assert_eq!(settings.author, None);
        assert_eq!(settings.fallback_font_family, "sans-serif");
        assert!(settings.fetch_remote_images);
        assert_eq!(settings.image_timeout_secs, 20);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = ExportSettings::load(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, ExportSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "outputDir": "out", "scale": 3.0 }"#).unwrap();

        let settings = ExportSettings::load(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.scale, 3.0);
        assert!(settings.compress);
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(ExportSettings::load(&path).unwrap(), ExportSettings::default());
    }

    #[test]
    fn test_invalid_numbers_are_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "scale": -1.0, "dpi": 0.0, "fallbackFontFamily": " ", "imageTimeoutSecs": 0 }"#,
        )
        .unwrap();

        let settings = ExportSettings::load(&path).unwrap();
        assert_eq!(settings.scale, DEFAULT_SCALE);
        assert_eq!(settings.dpi, DEFAULT_DPI);
        assert_eq!(settings.image_timeout_secs, DEFAULT_IMAGE_TIMEOUT_SECS);
        assert_eq!(settings.fallback_font_family, DEFAULT_FALLBACK_FONT);
    }

    #[tokio::test]
    async fn test_load_async() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "compress": false, "author": "Deal Team" }"#).unwrap();

        let settings = ExportSettings::load_async(&path).await.unwrap();
        assert!(!settings.compress);
        assert_eq!(settings.author.as_deref(), Some("Deal Team"));

        let missing = ExportSettings::load_async(temp_dir.path().join("none.json"))
            .await
            .unwrap();
        assert_eq!(missing, ExportSettings::default());
    }
}
