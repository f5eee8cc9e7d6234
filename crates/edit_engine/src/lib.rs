//! Edit Engine - Editor tabs and edit commands
//!
//! The editing form is split into four tabs, each owning a disjoint set of
//! [`Field`]s. Changes are expressed as [`EditCommand`] values that produce
//! a new company record; image fields are filled from local files.

mod command;
mod error;
mod image;
mod number;
mod tab;

pub use command::*;
pub use error::*;
pub use image::*;
pub use number::*;
pub use tab::*;
