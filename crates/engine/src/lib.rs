//! Engine - Template resolution and the render pipeline
//!
//! Orchestrates one render call end to end: locate the template
//! across configured search directories, verify the package format,
//! extract the mutable XML part set, delegate text to the host
//! templating engine, rewrite sentinel markup, inject images, and
//! splice the archive back together. Also carries the directive
//! helpers the host engine binds to its tag surface.

mod config;
mod context;
mod docx;
mod error;
mod fetch;
mod flat;
mod host;
mod odt;
mod resolve;
mod tags;

pub use config::*;
pub use context::*;
pub use docx::*;
pub use error::*;
pub use fetch::*;
pub use flat::*;
pub use host::*;
pub use odt::*;
pub use resolve::*;
pub use tags::*;
