//! Error types for unit operations

use thiserror::Error;

/// Errors that can occur while parsing dimensions or sizing images
#[derive(Debug, Error)]
pub enum UnitError {
    /// A dimension string did not match `<number><unit>` with a known unit
    #[error("invalid dimension: {0:?}")]
    InvalidDimension(String),

    /// Image bytes whose header matches no supported format
    #[error("unreadable image data: {0}")]
    UnreadableImage(String),
}

/// Result type for unit operations
pub type UnitResult<T> = std::result::Result<T, UnitError>;
