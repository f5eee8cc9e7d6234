//! Visual template definitions
//!
//! The catalog is fixed at compile time: five bank-inspired styles that
//! differ only in palette, typeface, and (in the `templates` crate) layout.

use crate::{Color, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a template style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[serde(rename = "goldman-inspired")]
    Goldman,
    #[serde(rename = "jpmorgan-inspired")]
    JpMorgan,
    #[serde(rename = "bofa-inspired")]
    Bofa,
    #[serde(rename = "morgan-stanley-inspired")]
    MorganStanley,
    #[serde(rename = "credit-suisse-inspired")]
    CreditSuisse,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Goldman,
        TemplateId::JpMorgan,
        TemplateId::Bofa,
        TemplateId::MorganStanley,
        TemplateId::CreditSuisse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Goldman => "goldman-inspired",
            TemplateId::JpMorgan => "jpmorgan-inspired",
            TemplateId::Bofa => "bofa-inspired",
            TemplateId::MorganStanley => "morgan-stanley-inspired",
            TemplateId::CreditSuisse => "credit-suisse-inspired",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ModelError::UnknownTemplate(s.to_string()))
    }
}

/// A template's identity and visual parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    /// Display name in the gallery
    pub name: &'static str,
    /// Bank label shown under the name
    pub bank: &'static str,
    pub thumbnail_url: Option<&'static str>,
    pub background_color: Color,
    /// Main text color
    pub primary_color: Color,
    /// Heavy accent (headings, banners)
    pub secondary_color: Color,
    /// Tertiary accent (borders, projected series)
    pub accent_color: Color,
    /// CSS font-family list
    pub font_family: &'static str,
}

impl Template {
    /// Look up a catalog entry by its string id
    pub fn find(id: &str) -> Option<&'static Template> {
        catalog().iter().find(|t| t.id.as_str() == id)
    }

    /// Get the catalog entry for an id
    pub fn get(id: TemplateId) -> &'static Template {
        // The catalog holds exactly one entry per id, in `TemplateId::ALL` order.
        &CATALOG[TemplateId::ALL
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or(0)]
    }

    /// The first family in the CSS font list, without quotes
    pub fn primary_font(&self) -> &'static str {
        self.font_family
            .split(',')
            .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"'))
            .find(|s| !s.is_empty())
            .unwrap_or("sans-serif")
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id,
            name: self.name,
            bank: self.bank,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

/// Gallery card data for the template selection screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
    pub bank: &'static str,
    pub thumbnail_url: Option<&'static str>,
}

static CATALOG: [Template; 5] = [
    Template {
        id: TemplateId::Goldman,
        name: "Premium Blue",
        bank: "Goldman Sachs Inspired",
        thumbnail_url: Some("https://images.pexels.com/photos/7821487/pexels-photo-7821487.jpeg"),
        background_color: Color::WHITE,
        primary_color: Color::rgb(0x0A, 0x23, 0x51),
        secondary_color: Color::rgb(0x56, 0x7A, 0xBC),
        accent_color: Color::rgb(0xE8, 0xC0, 0x52),
        font_family: "'Helvetica Neue', sans-serif",
    },
    Template {
        id: TemplateId::JpMorgan,
        name: "Corporate Navy",
        bank: "JP Morgan Inspired",
        thumbnail_url: Some("https://images.pexels.com/photos/5849577/pexels-photo-5849577.jpeg"),
        background_color: Color::WHITE,
        primary_color: Color::rgb(0x2C, 0x3E, 0x50),
        secondary_color: Color::rgb(0x1A, 0xBC, 0x9C),
        accent_color: Color::rgb(0xF1, 0xC4, 0x0F),
        font_family: "'Roboto', sans-serif",
    },
    Template {
        id: TemplateId::Bofa,
        name: "Classic Red",
        bank: "Bank of America Inspired",
        thumbnail_url: Some("https://images.pexels.com/photos/6476260/pexels-photo-6476260.jpeg"),
        background_color: Color::WHITE,
        primary_color: Color::rgb(0x1E, 0x2A, 0x3B),
        secondary_color: Color::rgb(0xB2, 0x22, 0x22),
        accent_color: Color::rgb(0xDE, 0xE2, 0xE6),
        font_family: "'Inter', sans-serif",
    },
    Template {
        id: TemplateId::MorganStanley,
        name: "Elegant Teal",
        bank: "Morgan Stanley Inspired",
        thumbnail_url: Some("https://images.pexels.com/photos/5849578/pexels-photo-5849578.jpeg"),
        background_color: Color::WHITE,
        primary_color: Color::rgb(0x0F, 0x30, 0x57),
        secondary_color: Color::rgb(0x00, 0x58, 0x7A),
        accent_color: Color::rgb(0x00, 0x88, 0x91),
        font_family: "'Lato', sans-serif",
    },
    Template {
        id: TemplateId::CreditSuisse,
        name: "Swiss Precision",
        bank: "Credit Suisse Inspired",
        thumbnail_url: Some("https://images.pexels.com/photos/5863366/pexels-photo-5863366.jpeg"),
        background_color: Color::WHITE,
        primary_color: Color::rgb(0x0F, 0x2C, 0x4F),
        secondary_color: Color::rgb(0xA3, 0x16, 0x21),
        accent_color: Color::rgb(0xCC, 0xC9, 0xDC),
        font_family: "'Open Sans', sans-serif",
    },
];

/// The fixed template catalog, in gallery order
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_unique_ids() {
        let ids: Vec<_> = catalog().iter().map(|t| t.id).collect();
        assert_eq!(ids, TemplateId::ALL.to_vec());
    }

    #[test]
    fn test_get_matches_catalog_order() {
        for id in TemplateId::ALL {
            assert_eq!(Template::get(id).id, id);
        }
    }

    #[test]
    fn test_find_by_string_id() {
        let template = Template::find("bofa-inspired").unwrap();
        assert_eq!(template.name, "Classic Red");
        assert_eq!(template.secondary_color, Color::rgb(0xB2, 0x22, 0x22));
        assert!(Template::find("lehman-inspired").is_none());
    }

    #[test]
    fn test_template_id_parse() {
        assert_eq!(
            "morgan-stanley-inspired".parse::<TemplateId>().unwrap(),
            TemplateId::MorganStanley
        );
        assert!("".parse::<TemplateId>().is_err());
        assert_eq!(TemplateId::CreditSuisse.to_string(), "credit-suisse-inspired");
    }

    #[test]
    fn test_primary_font() {
        assert_eq!(Template::get(TemplateId::Goldman).primary_font(), "Helvetica Neue");
        assert_eq!(Template::get(TemplateId::CreditSuisse).primary_font(), "Open Sans");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_string(&Template::get(TemplateId::JpMorgan).summary()).unwrap();
        assert!(json.contains("\"id\":\"jpmorgan-inspired\""));
        assert!(json.contains("\"thumbnailUrl\""));
    }
}
