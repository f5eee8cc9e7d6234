//! Charts - Line charts for teaser financials
//!
//! This crate provides support for:
//! - Building the historical/projected line chart model from data points
//! - Calculating chart layouts with rounded value axes
//! - Rendering charts to primitives or SVG, with tooltip hit-testing
//! - A canvas slot that rebuilds its chart whenever the inputs change

mod canvas;
mod layout;
mod model;
mod render;

pub use canvas::*;
pub use layout::*;
pub use model::*;
pub use render::*;
