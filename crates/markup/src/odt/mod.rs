//! OpenDocument text markup mutation
//!
//! Cleans rendered content.xml (style table upkeep, text-input
//! unwrapping, sentinel rewriting) and injects images with manifest
//! bookkeeping.

mod image;
mod styles;
mod text;

pub use image::*;
pub use styles::*;
pub use text::*;

use crate::error::MarkupResult;
use crate::tree::{Element, XML_DECLARATION};

/// Content part holding the document body and automatic styles
pub const CONTENT_PART: &str = "content.xml";
/// Named-styles part, spliced together with the content part
pub const STYLES_PART: &str = "styles.xml";
/// Manifest part recording media paths
pub const MANIFEST_PART: &str = "META-INF/manifest.xml";
/// Media directory inside the package
pub const PICTURES_DIR: &str = "Pictures";

/// Rewrite rendered content.xml into valid markup.
///
/// Ordered pipeline: ensure the automatic styles the HTML filter and
/// bold spans reference, unwrap `text:text-input` placeholders, then
/// rewrite line-break and bold sentinels inside text nodes.
///
/// Unpaired sentinel contract: markers are processed in document
/// order per text node. An unpaired `<b>` bolds the rest of its text
/// node; an unpaired `</b>` is a no-op toggle. Malformed input is
/// never an error and never silently dropped.
pub fn clean(content: &str) -> MarkupResult<String> {
    let mut root = Element::parse_document(content)?;
    ensure_automatic_styles(&mut root)?;
    unwrap_text_inputs(&mut root);
    rewrite_sentinels(&mut root);
    Ok(format!("{}{}", XML_DECLARATION, root.to_xml()))
}
