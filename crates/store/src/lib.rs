//! Store - Export settings and file output
//!
//! This crate turns a rendered teaser page into files: it loads the export
//! settings, resolves page images into inline data, rasterizes the page,
//! and writes either a PNG or a single-page PDF that embeds the raster.

mod error;
mod export;
mod format;
mod raster;
mod resolver;
mod settings;
pub mod pdf;

pub use error::*;
pub use export::*;
pub use format::*;
pub use raster::*;
pub use resolver::*;
pub use settings::*;
