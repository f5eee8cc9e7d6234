//! Render Model - Page primitives for teaser documents
//!
//! Templates describe a page as a list of render items in CSS pixels on a
//! fixed A4 sheet. The same page is serialized to SVG for preview and, with
//! images resolved, for rasterized export. Text is measured with the same
//! [`FontBook`] the rasterizer draws with.

mod fonts;
mod page;
mod render_item;
mod text;

pub use fonts::*;
pub use page::*;
pub use render_item::*;
pub use text::*;
