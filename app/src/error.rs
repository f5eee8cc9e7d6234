//! Error types for the application shell

use crate::Mode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Cannot {action} while in {mode} mode")]
    InvalidTransition { mode: Mode, action: &'static str },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Edit failed: {0}")]
    Edit(#[from] edit_engine::EditError),

    #[error("Export failed: {0}")]
    Export(#[from] store::ExportError),
}

pub type Result<T> = std::result::Result<T, ShellError>;
