//! Font lookup and text shaping
//!
//! Layout measures text against the same faces the rasterizer draws with.
//! A [`FontBook`] wraps a fontdb database whose generic families point at
//! installed faces and shapes runs with rustybuzz. When no face matches a
//! run, its width is estimated per character so layout still completes.

use fontdb::{Database, Family, Query, Style, Weight, ID};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Installed faces tried for `sans-serif`, best first
const SANS_SERIF_FACES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
    "Open Sans",
    "FreeSans",
];

const SERIF_FACES: &[&str] = &[
    "Times New Roman",
    "Times",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
    "FreeSerif",
];

const MONOSPACE_FACES: &[&str] = &[
    "Courier New",
    "Courier",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "FreeMono",
];

/// Estimated advances as a fraction of font size, used without a face
const NARROW_ADVANCE: f64 = 0.3;
const REGULAR_ADVANCE: f64 = 0.55;
const WIDE_ADVANCE: f64 = 0.85;
const BOLD_FACTOR: f64 = 1.08;

static SYSTEM: OnceLock<Arc<FontBook>> = OnceLock::new();

/// Point `sans-serif`, `serif` and `monospace` at faces that are installed
///
/// fontdb maps the generic families to fixed names ("Arial", "Times New
/// Roman", ...). On hosts without those faces every CSS font list ending
/// in a generic family would match nothing.
pub fn map_generic_families(db: &mut Database) {
    let Some(sans) = pick_family(db, SANS_SERIF_FACES, false) else {
        return;
    };
    let serif = pick_family(db, SERIF_FACES, false).unwrap_or_else(|| sans.clone());
    let monospace = pick_family(db, MONOSPACE_FACES, true).unwrap_or_else(|| sans.clone());

    debug!(sans_serif = %sans, serif = %serif, monospace = %monospace, "Mapped generic font families");
    db.set_sans_serif_family(sans.clone());
    db.set_serif_family(serif);
    db.set_monospace_family(monospace);
    db.set_cursive_family(sans.clone());
    db.set_fantasy_family(sans);
}

/// First preferred family present in `db`, else the alphabetically first
/// installed family of the wanted spacing
fn pick_family(db: &Database, preferred: &[&str], monospaced: bool) -> Option<String> {
    let installed = |name: &str| {
        db.faces()
            .any(|face| face.families.iter().any(|(family, _)| family == name))
    };
    if let Some(name) = preferred.iter().find(|name| installed(name)) {
        return Some(name.to_string());
    }

    db.faces()
        .filter(|face| face.monospaced == monospaced)
        .filter_map(|face| face.families.first().map(|(family, _)| family.clone()))
        .min()
}

/// Split a CSS `font-family` list into fontdb families
pub fn parse_family_list(list: &str) -> Vec<Family<'_>> {
    list.split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
        .map(|name| match name.to_ascii_lowercase().as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(name),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    bold: bool,
    italic: bool,
}

/// Font bytes copied out of the database once per face
struct FaceData {
    data: Vec<u8>,
    index: u32,
}

/// A font database plus the shaping needed to measure text in it
pub struct FontBook {
    db: Arc<Database>,
    faces: RwLock<HashMap<FaceKey, Option<Arc<FaceData>>>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook").field("faces", &self.db.len()).finish()
    }
}

impl FontBook {
    /// Wrap `db`, mapping its generic families first
    pub fn new(mut db: Database) -> Self {
        map_generic_families(&mut db);
        Self::from_shared(Arc::new(db))
    }

    /// Wrap an already prepared database as is
    pub fn from_shared(db: Arc<Database>) -> Self {
        Self {
            db,
            faces: RwLock::new(HashMap::new()),
        }
    }

    /// A book with no faces; every width is estimated
    pub fn empty() -> Self {
        Self::from_shared(Arc::new(Database::new()))
    }

    /// The process-wide book over the installed system fonts
    ///
    /// Fonts are loaded on first use and shared by layout and rasterization.
    pub fn system() -> Arc<FontBook> {
        Arc::clone(SYSTEM.get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "Loaded system fonts");
            Arc::new(FontBook::new(db))
        }))
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// The face a run in `family` would be drawn with
    pub fn query(&self, family: &str, bold: bool, italic: bool) -> Option<ID> {
        let families = parse_family_list(family);
        self.db.query(&Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            style: if italic { Style::Italic } else { Style::Normal },
            ..Query::default()
        })
    }

    /// Advance width of `text` at `font_size`, letter spacing excluded
    pub fn advance(&self, text: &str, family: &str, font_size: f64, bold: bool, italic: bool) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        match self.face(family, bold, italic) {
            Some(face) => shaped_width(&face, text, font_size)
                .unwrap_or_else(|| estimated_width(text, font_size, bold)),
            None => estimated_width(text, font_size, bold),
        }
    }

    fn face(&self, family: &str, bold: bool, italic: bool) -> Option<Arc<FaceData>> {
        let key = FaceKey {
            family: family.to_string(),
            bold,
            italic,
        };
        if let Some(cached) = self
            .faces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return cached.clone();
        }

        let loaded = self.query(family, bold, italic).and_then(|id| {
            self.db
                .with_face_data(id, |data, index| FaceData {
                    data: data.to_vec(),
                    index,
                })
                .map(Arc::new)
        });
        if loaded.is_none() {
            debug!(family, bold, italic, "No installed face, estimating widths");
        }

        self.faces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, loaded.clone());
        loaded
    }
}

fn shaped_width(face: &FaceData, text: &str, font_size: f64) -> Option<f64> {
    let face = rustybuzz::Face::from_slice(&face.data, face.index)?;
    let units_per_em = face.units_per_em();
    if units_per_em <= 0 {
        return None;
    }

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    let output = rustybuzz::shape(&face, &[], buffer);

    let advance: i64 = output
        .glyph_positions()
        .iter()
        .map(|position| i64::from(position.x_advance))
        .sum();
    Some(advance as f64 * font_size / f64::from(units_per_em))
}

fn estimated_width(text: &str, font_size: f64, bold: bool) -> f64 {
    let ems: f64 = text
        .chars()
        .map(|ch| match ch {
            ' ' | 'i' | 'l' | 'j' | 't' | 'f' | 'r' | 'I' | '1' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => {
                NARROW_ADVANCE
            }
            'm' | 'w' | 'M' | 'W' | '@' | '%' => WIDE_ADVANCE,
            'A'..='Z' => 0.68,
            _ => REGULAR_ADVANCE,
        })
        .sum();
    let factor = if bold { BOLD_FACTOR } else { 1.0 };
    ems * font_size * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A database holding one installed face, if the host has any
    fn single_face_database() -> Option<(Database, String)> {
        let system = FontBook::system();
        let db = system.database();
        let face = db.faces().find(|face| !face.monospaced && !face.families.is_empty())?;
        let data = db.with_face_data(face.id, |data, _| data.to_vec())?;
        let family = face.families[0].0.clone();

        let mut single = Database::new();
        single.load_font_data(data);
        Some((single, family))
    }

    #[test]
    fn test_parse_family_list() {
        let families = parse_family_list("'Helvetica Neue', \"Open Sans\", sans-serif");
        assert_eq!(
            families,
            vec![
                Family::Name("Helvetica Neue"),
                Family::Name("Open Sans"),
                Family::SansSerif
            ]
        );
        assert_eq!(parse_family_list("Serif"), vec![Family::Serif]);
        assert!(parse_family_list(" , ").is_empty());
    }

    #[test]
    fn test_empty_book_estimates() {
        let book = FontBook::empty();
        assert!(book.query("sans-serif", false, false).is_none());
        assert_eq!(book.advance("", "sans-serif", 10.0, false, false), 0.0);

        let narrow = book.advance("iiii", "sans-serif", 10.0, false, false);
        let wide = book.advance("MMMM", "sans-serif", 10.0, false, false);
        assert!(narrow < wide);
        assert!(book.advance("MMMM", "sans-serif", 10.0, true, false) > wide);
    }

    #[test]
    fn test_generic_family_maps_to_installed_face() {
        let Some((db, family)) = single_face_database() else {
            // No fonts installed on this host
            return;
        };
        let book = FontBook::new(db);

        assert!(book.query("sans-serif", false, false).is_some());
        assert!(book.query("'Not An Installed Face', sans-serif", false, false).is_some());
        assert!(book.query(&family, false, false).is_some());
    }

    #[test]
    fn test_shaped_width_scales_with_size() {
        let Some((db, _)) = single_face_database() else {
            return;
        };
        let book = FontBook::new(db);

        let small = book.advance("Revenue growth", "sans-serif", 10.0, false, false);
        let large = book.advance("Revenue growth", "sans-serif", 20.0, false, false);
        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 1e-6);
        assert!(book.advance("Revenue growth, 2024", "sans-serif", 10.0, false, false) > small);
    }

    #[test]
    fn test_faces_are_cached() {
        let book = FontBook::empty();
        book.advance("abc", "Inter, sans-serif", 10.0, false, false);
        book.advance("abc", "Inter, sans-serif", 10.0, false, false);
        assert_eq!(book.faces.read().unwrap().len(), 1);
    }
}
