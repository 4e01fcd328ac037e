//! Error types for package operations

use thiserror::Error;

/// Errors that can occur while reading or rewriting a package archive
#[derive(Debug, Error)]
pub enum PackError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not a valid archive or not the expected format
    #[error("invalid package format: {0}")]
    Format(String),

    /// A named part does not exist in the archive
    #[error("missing package part: {0}")]
    MissingPart(String),

    /// An entry path is already taken
    #[error("duplicate package entry: {0}")]
    DuplicateEntry(String),

    /// UTF-8 decoding error for a text part
    #[error("part is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<zip::result::ZipError> for PackError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => {
                PackError::MissingPart("<unnamed>".to_string())
            }
            other => PackError::Format(other.to_string()),
        }
    }
}

/// Result type for package operations
pub type PackResult<T> = std::result::Result<T, PackError>;
