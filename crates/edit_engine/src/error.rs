//! Error types for editing operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Index {index} out of range for {field} (length {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EditError>;
