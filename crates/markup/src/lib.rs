//! Markup - Structured document markup surgery
//!
//! Takes host-engine output containing sentinel constructs (hard line
//! breaks, bold span markers, embedded HTML) and rewrites it into
//! valid WordprocessingML or OpenDocument markup, injects images with
//! the matching relationship/manifest bookkeeping, and transpiles a
//! constrained HTML subset into document markup.

mod error;
mod id;
mod tree;

pub mod docx;
pub mod html;
pub mod odt;

pub use error::*;
pub use id::*;
pub use tree::*;
