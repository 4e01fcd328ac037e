//! WordprocessingML markup mutation
//!
//! Rewrites host-engine output into valid document.xml markup and
//! injects media with relationship bookkeeping.

mod image;
mod text;

pub use image::*;
pub use text::*;

/// Content part holding the document body
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Relationships part for the document body
pub const RELS_PART: &str = "word/_rels/document.xml.rels";
/// Media directory inside the package
pub const MEDIA_DIR: &str = "word/media";
/// Relationship type URI for embedded images
pub const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
