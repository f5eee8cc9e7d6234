//! PDF object model
//!
//! Only the object kinds a single-image page needs: numbers, names,
//! strings, arrays, dictionaries, streams and indirect references.

use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string, escaped on output
    String(Vec<u8>),
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    /// Indirect reference to object `n 0 R`
    Reference(u32),
}

impl PdfObject {
    pub fn name(name: impl Into<String>) -> Self {
        PdfObject::Name(name.into())
    }

    pub fn text(text: &str) -> Self {
        PdfObject::String(encode_text(text))
    }

    /// `[0 0 width height]`
    pub fn rect(width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(width),
            PdfObject::Real(height),
        ])
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<u32> for PdfObject {
    fn from(n: u32) -> Self {
        PdfObject::Integer(n.into())
    }
}

impl From<f64> for PdfObject {
    fn from(n: f64) -> Self {
        PdfObject::Real(n)
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

/// Encode document text for a literal string
///
/// ASCII text is written as is; anything else becomes UTF-16BE with a byte
/// order mark, which PDF readers accept in text strings.
fn encode_text(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Dictionary with keys in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary whose `/Type` is `type_name`
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PdfObject>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }
}

/// Stream: a dictionary plus raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

impl PdfStream {
    pub fn new(dict: PdfDictionary, data: Vec<u8>) -> Self {
        Self { dict, data }
    }
}

/// Writes objects in PDF syntax
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(bytes) => self.write_string(bytes),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(items) => {
                write!(self.writer, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(self.writer, " ")?;
                    }
                    self.write_object(item)?;
                }
                write!(self.writer, "]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Reference(n) => write!(self.writer, "{} 0 R", n),
        }
    }

    /// Dictionary, `stream` keyword, raw data, `endstream`
    ///
    /// `/Length` must already be set in the stream dictionary.
    pub fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_string(&mut self, bytes: &[u8]) -> io::Result<()> {
        write!(self.writer, "(")?;
        for &byte in bytes {
            match byte {
                b'(' | b')' | b'\\' => write!(self.writer, "\\{}", byte as char)?,
                b'\n' => write!(self.writer, "\\n")?,
                b'\r' => write!(self.writer, "\\r")?,
                0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "\\{:03o}", byte)?,
            }
        }
        write!(self.writer, ")")
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reals with at most four decimals and no trailing zeros
pub(crate) fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{}", n as i64);
    }
    let s = format!("{:.4}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
