//! Error types for markup operations

use thiserror::Error;

/// Errors that can occur while rewriting document markup
#[derive(Debug, Error)]
pub enum MarkupError {
    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The markup is missing an element the mutation needs
    #[error("invalid markup structure: {0}")]
    InvalidStructure(String),

    /// The computed media path is already taken in the package
    #[error("duplicate image name: {0}")]
    DuplicateImageName(String),

    /// Package-level error
    #[error(transparent)]
    Pack(#[from] pack::PackError),

    /// Dimension or image-probe error
    #[error(transparent)]
    Units(#[from] units::UnitError),
}

impl From<quick_xml::Error> for MarkupError {
    fn from(err: quick_xml::Error) -> Self {
        MarkupError::Xml(err.to_string())
    }
}

/// Result type for markup operations
pub type MarkupResult<T> = std::result::Result<T, MarkupError>;
