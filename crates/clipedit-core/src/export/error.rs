//! Export error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while delivering an encoded clip
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid export file name: {0:?}")]
    InvalidFileName(String),

    #[error("Failed to create export directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
