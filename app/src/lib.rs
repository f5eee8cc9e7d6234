//! Teaser Gen - Application shell
//!
//! Ties the workspace together: the [`Shell`] moves between template
//! selection, editing and preview, owns the company record, and hands the
//! preview page to the export pipeline.

mod error;
mod shell;

pub use error::*;
pub use shell::*;
