//! PDF output
//!
//! A minimal writer for single-page documents that carry the rasterized
//! teaser as one full-page image.
//!
//! - `objects`: object model and serializer
//! - `document`: info dictionary, page tree, image XObject
//! - `writer`: offsets, xref table, trailer, compression

mod document;
mod objects;
mod writer;

pub use document::*;
pub use objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
pub use writer::{write_image_pdf, PdfError, PdfWriter, Result};
