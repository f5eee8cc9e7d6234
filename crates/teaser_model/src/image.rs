//! Image sources for logos and location photos
//!
//! Uploaded images are kept inline (bytes plus MIME type) so a record is
//! self-contained; anything else is an external reference that has to be
//! resolved at export time.

use crate::{ModelError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An image stored directly in the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ModelError::InvalidDataUrl("missing data: prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ModelError::InvalidDataUrl("missing payload separator".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| ModelError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| ModelError::InvalidDataUrl(e.to_string()))?;

        let mime_type = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type
        };
        Ok(Self::new(mime_type, data))
    }

    /// Encode as a `data:` URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Self-contained image bytes (uploaded by the user)
    Inline(InlineImage),
    /// External reference (remote URL or file URL)
    Url(String),
}

impl ImageSource {
    /// Parse the string form used in JSON records
    pub fn parse(value: &str) -> Result<Self> {
        if value.starts_with("data:") {
            InlineImage::from_data_url(value).map(ImageSource::Inline)
        } else {
            Ok(ImageSource::Url(value.to_string()))
        }
    }

    /// The string form: a data URL for inline images, the reference otherwise
    pub fn to_href(&self) -> String {
        match self {
            ImageSource::Inline(image) => image.to_data_url(),
            ImageSource::Url(url) => url.clone(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageSource::Inline(_))
    }
}

impl From<InlineImage> for ImageSource {
    fn from(image: InlineImage) -> Self {
        ImageSource::Inline(image)
    }
}

impl Serialize for ImageSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_href())
    }
}

impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        ImageSource::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for InlineImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for InlineImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        InlineImage::from_data_url(&value).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional image fields: `""` means no image
pub(crate) mod optional_image {
    use super::ImageSource;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<ImageSource>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(source) => serializer.serialize_str(&source.to_href()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ImageSource>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if value.trim().is_empty() {
            return Ok(None);
        }
        ImageSource::parse(&value)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
