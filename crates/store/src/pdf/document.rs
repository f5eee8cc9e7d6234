//! Document-level PDF structures: info dictionary, page tree, image XObject

use super::objects::{format_real, PdfDictionary, PdfObject, PdfStream};
use chrono::{DateTime, Utc};

/// A4 width in points
pub const A4_WIDTH_PT: f64 = 595.28;
/// A4 height in points
pub const A4_HEIGHT_PT: f64 = 841.89;

/// Resource name of the page image
pub const PAGE_IMAGE_NAME: &str = "Im1";

/// Document information dictionary
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Info for a teaser export of `company_name`, dated now
    pub fn teaser(company_name: &str) -> Self {
        Self {
            title: Some(format!("{} Teaser", company_name)),
            author: None,
            creator: Some("Teaser Generator".to_string()),
            producer: Some(format!("teaser-gen store {}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(Utc::now()),
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                dict.insert(key, PdfObject::text(value));
            }
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(&date)));
        }
        dict
    }
}

/// Format a timestamp as a PDF date string, `D:YYYYMMDDHHmmSSZ`
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Raw 8-bit RGB pixels for an image XObject
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, three bytes per pixel
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    /// Whether `data` holds exactly `width * height` pixels
    pub fn is_complete(&self) -> bool {
        self.data.len() as u64 == u64::from(self.width) * u64::from(self.height) * 3
    }

    /// Image XObject stream (uncompressed; the writer applies the filter)
    pub fn to_stream(&self) -> PdfStream {
        let mut dict = PdfDictionary::typed("XObject");
        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", self.width);
        dict.insert("Height", self.height);
        dict.insert("ColorSpace", PdfObject::name("DeviceRGB"));
        dict.insert("BitsPerComponent", 8i64);
        PdfStream::new(dict, self.data.clone())
    }
}

/// Content stream drawing the page image over the whole page
pub fn full_page_image_content(width: f64, height: f64) -> Vec<u8> {
    format!(
        "q\n{} 0 0 {} 0 0 cm\n/{} Do\nQ\n",
        format_real(width),
        format_real(height),
        PAGE_IMAGE_NAME
    )
    .into_bytes()
}

pub fn catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref));
    dict
}

pub fn page_tree(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Pages");
    dict.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|r| PdfObject::Reference(*r)).collect()),
    );
    dict.insert("Count", page_refs.len() as i64);
    dict
}

/// A4 page whose only resource is the page image
pub fn image_page(parent_ref: u32, content_ref: u32, image_ref: u32) -> PdfDictionary {
    let mut xobjects = PdfDictionary::new();
    xobjects.insert(PAGE_IMAGE_NAME, PdfObject::Reference(image_ref));
    let mut resources = PdfDictionary::new();
    resources.insert("XObject", xobjects);

    let mut dict = PdfDictionary::typed("Page");
    dict.insert("Parent", PdfObject::Reference(parent_ref));
    dict.insert("MediaBox", PdfObject::rect(A4_WIDTH_PT, A4_HEIGHT_PT));
    dict.insert("Resources", resources);
    dict.insert("Contents", PdfObject::Reference(content_ref));
    dict
}
