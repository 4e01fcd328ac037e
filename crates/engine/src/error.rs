//! Error types for the render pipeline

use thiserror::Error;

/// Errors surfaced to the render caller
#[derive(Debug, Error)]
pub enum EngineError {
    /// No configured directory holds a template with this name
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// A directive argument uses an unrecognized keyword
    #[error("unknown keyword '{keyword}' in {directive} directive, expected one of {expected}")]
    DirectiveSyntax {
        directive: &'static str,
        keyword: String,
        expected: &'static str,
    },

    /// The host templating engine failed to render the part text
    #[error("host engine error: {0}")]
    Host(String),

    /// Markup mutation error
    #[error(transparent)]
    Markup(#[from] markup::MarkupError),

    /// Package-level error, including format mismatches
    #[error(transparent)]
    Pack(#[from] pack::PackError),

    /// Dimension or image-probe error
    #[error(transparent)]
    Units(#[from] units::UnitError),

    /// Filesystem error while reading a template
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for render operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;
