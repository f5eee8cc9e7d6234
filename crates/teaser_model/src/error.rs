//! Error types for the data model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
