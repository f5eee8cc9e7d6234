//! Reading local image files into inline images

use crate::{EditError, Result};
use std::path::Path;
use teaser_model::InlineImage;
use tracing::debug;

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn read_error(path: &Path, source: std::io::Error) -> EditError {
    EditError::ImageRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Read an image file into an inline image
///
/// The MIME type comes from the file extension; the bytes are not checked.
pub fn load_image_file(path: impl AsRef<Path>) -> Result<InlineImage> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| read_error(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "Loaded image file");
    Ok(InlineImage::new(guess_mime(path), data))
}

/// Async variant of [`load_image_file`]
pub async fn load_image_file_async(path: impl AsRef<Path>) -> Result<InlineImage> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;
    debug!(path = %path.display(), bytes = data.len(), "Loaded image file");
    Ok(InlineImage::new(guess_mime(path), data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(guess_mime(Path::new("logo.png")), "image/png");
        assert_eq!(guess_mime(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("mystery")), "application/octet-stream");
    }

    #[test]
    fn test_load_keeps_bytes_unvalidated() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"not really a png").unwrap();

        let image = load_image_file(file.path()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"not really a png");
        assert!(image.to_data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image_file(dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, EditError::ImageRead { .. }));
    }

    #[tokio::test]
    async fn test_async_load() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a").unwrap();

        let image = load_image_file_async(file.path()).await.unwrap();
        assert_eq!(image.mime_type, "image/gif");
        assert_eq!(image.data, b"GIF89a");
    }
}
