//! PDF file writer
//!
//! Tracks byte offsets of indirect objects so the cross-reference table can
//! be written at the end, and applies Flate compression to streams.

use super::document::{
    catalog, full_page_image_content, image_page, page_tree, DocumentInfo, RgbImage,
    A4_HEIGHT_PT, A4_WIDTH_PT,
};
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use thiserror::Error;

const PDF_VERSION: &str = "1.4";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Low-level writer for indirect objects, xref table and trailer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset)
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, compress: bool) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress,
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    fn begin_object(&mut self, obj_num: u32) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{} 0 obj\n", obj_num))
    }

    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.begin_object(obj_num)?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it first when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&stream.data)?;
            stream.data = encoder.finish()?;
            stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
        }
        stream.dict.insert("Length", stream.data.len() as i64);

        self.begin_object(obj_num)?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_stream(&stream)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")
    }

    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let mut offsets = std::mem::take(&mut self.offsets);
        offsets.sort_by_key(|(num, _)| *num);

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", self.next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected = 1u32;
        for (num, offset) in &offsets {
            while expected < *num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
            expected = num + 1;
        }
        while expected < self.next_obj_num {
            self.write_str("0000000000 65535 f \n")?;
            expected += 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", self.next_obj_num);
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))?;

        self.offsets = offsets;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write a one-page A4 document whose page is `image` stretched edge to edge
pub fn write_image_pdf<W: Write>(
    image: &RgbImage,
    info: &DocumentInfo,
    compress: bool,
    writer: W,
) -> Result<W> {
    if image.width == 0 || image.height == 0 {
        return Err(PdfError::InvalidDocument("page image is empty".to_string()));
    }
    if !image.is_complete() {
        return Err(PdfError::InvalidDocument(format!(
            "expected {} bytes of RGB data for {}x{}, got {}",
            u64::from(image.width) * u64::from(image.height) * 3,
            image.width,
            image.height,
            image.data.len()
        )));
    }

    let mut pdf = PdfWriter::new(writer, compress);
    pdf.write_header()?;

    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let page_ref = pdf.allocate_object();
    let content_ref = pdf.allocate_object();
    let image_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();

    pdf.write_object(catalog_ref, &catalog(pages_ref).into())?;
    pdf.write_object(pages_ref, &page_tree(&[page_ref]).into())?;
    pdf.write_object(page_ref, &image_page(pages_ref, content_ref, image_ref).into())?;
    pdf.write_stream_object(
        content_ref,
        PdfStream::new(
            PdfDictionary::new(),
            full_page_image_content(A4_WIDTH_PT, A4_HEIGHT_PT),
        ),
    )?;
    pdf.write_stream_object(image_ref, image.to_stream())?;
    pdf.write_object(info_ref, &info.to_dictionary().into())?;
    pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
    pdf.finish()
}
