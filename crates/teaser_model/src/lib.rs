//! Teaser Model - Company data and template definitions
//!
//! This crate provides the plain records every other crate works with:
//! the company/financial facts a user edits, the inline image
//! representation used for uploaded logos and photos, and the fixed
//! catalog of visual templates.

mod color;
mod company;
mod defaults;
mod error;
mod image;
mod template;

pub use color::*;
pub use company::*;
pub use error::*;
pub use image::*;
pub use template::*;
