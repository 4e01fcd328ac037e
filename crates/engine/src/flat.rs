//! Flat HTML render pipeline
//!
//! Templates destined for PDF conversion are plain HTML files named
//! with a `.pdf.html` double suffix; rendering is host substitution
//! with no package structure. The PDF rasterizer itself is an
//! external concern.

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::error::{EngineError, EngineResult};
use crate::host::HostEngine;
use crate::resolve::resolve;

/// Suffix required of flat HTML template names
pub const FLAT_SUFFIX: &str = ".pdf.html";

/// Renders flat HTML templates
pub struct FlatHtmlEngine<H: HostEngine> {
    config: EngineConfig,
    host: H,
}

impl<H: HostEngine> FlatHtmlEngine<H> {
    pub fn new(config: EngineConfig, host: H) -> Self {
        Self { config, host }
    }

    /// Render a flat template located by name. Names without the
    /// double suffix are not flat templates and never resolve.
    pub fn render(&self, name: &str, context: &RenderContext) -> EngineResult<Vec<u8>> {
        if !name.ends_with(FLAT_SUFFIX) {
            return Err(EngineError::TemplateNotFound(name.to_string()));
        }
        let path = resolve(name, &self.config)?;
        let source = std::fs::read_to_string(path)?;
        let rendered = self.host.render(&source, context)?;
        tracing::debug!(template = name, bytes = rendered.len(), "flat template rendered");
        Ok(rendered.into_bytes())
    }
}
