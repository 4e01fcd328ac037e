//! Pack - Template package archives
//!
//! This crate owns the ZIP layer of the rendering pipeline: opening a
//! template package, detecting its document format, extracting XML
//! parts, and splicing rewritten parts back while every untouched
//! entry is preserved byte for byte in its original order.

mod error;
mod reader;
mod splice;

pub use error::*;
pub use reader::*;
pub use splice::*;
