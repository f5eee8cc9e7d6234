//! Export formats and output file naming

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to every export file stem
pub const FILE_STEM_SUFFIX: &str = "-teaser";

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Png];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
        }
    }

    /// Generic message shown when an export in this format fails
    pub fn failure_notice(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "Failed to generate PDF. Please try again.",
            ExportFormat::Png => "Failed to generate PNG. Please try again.",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "PDF"),
            ExportFormat::Png => write!(f, "PNG"),
        }
    }
}

/// File stem for a company's export: lowercased, whitespace runs joined by `-`
///
/// Path separators are replaced as well so the file always lands in the
/// output directory.
pub fn export_file_stem(company_name: &str) -> String {
    let mut stem = String::with_capacity(company_name.len() + FILE_STEM_SUFFIX.len());
    let mut in_space = false;
    for c in company_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match c {
            '/' | '\\' => stem.push('-'),
            _ => stem.extend(c.to_lowercase()),
        }
    }
    stem.push_str(FILE_STEM_SUFFIX);
    stem
}

/// Full file name, e.g. `ecowind-services-teaser.pdf`
pub fn export_file_name(company_name: &str, format: ExportFormat) -> String {
    format!("{}.{}", export_file_stem(company_name), format.extension())
}
