//! OpenDocument text render pipeline
//!
//! Content and styles are a coordinated part set: both go through the
//! host engine (headers and footers live in styles.xml), the content
//! part additionally goes through the markup cleaner, and both are
//! spliced back in one pass.

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::error::EngineResult;
use crate::host::HostEngine;
use crate::resolve::resolve;
use markup::odt::{self, CONTENT_PART, STYLES_PART};
use pack::{splice_archive, PackageFormat, PackageReader};
use std::collections::BTreeMap;
use units::probe_image;

/// Renders odt template packages
pub struct OdtEngine<H: HostEngine> {
    config: EngineConfig,
    host: H,
}

impl<H: HostEngine> OdtEngine<H> {
    pub fn new(config: EngineConfig, host: H) -> Self {
        Self { config, host }
    }

    /// Render a template located by name against the configured
    /// search paths
    pub fn render(&self, name: &str, context: &RenderContext) -> EngineResult<Vec<u8>> {
        let path = resolve(name, &self.config)?;
        let package = std::fs::read(path)?;
        self.render_package(&package, context)
    }

    /// Render a template package already in memory
    pub fn render_package(&self, package: &[u8], context: &RenderContext) -> EngineResult<Vec<u8>> {
        let mut reader = PackageReader::new(package.to_vec())?;
        reader.expect_format(PackageFormat::Odt)?;

        let content_source = reader.part_string(CONTENT_PART)?;
        let content = odt::clean(&self.host.render(&content_source, context)?)?;
        tracing::debug!(part = CONTENT_PART, bytes = content.len(), "odt content rendered");

        let mut replacements = BTreeMap::new();
        replacements.insert(CONTENT_PART.to_string(), content.into_bytes());
        if reader.has_entry(STYLES_PART) {
            let styles_source = reader.part_string(STYLES_PART)?;
            let styles = self.host.render(&styles_source, context)?;
            replacements.insert(STYLES_PART.to_string(), styles.into_bytes());
        }

        let mut output = splice_archive(package, &replacements)?;
        for image in context.images.values() {
            if let Err(err) = probe_image(&image.content) {
                tracing::warn!(image = %image.name, error = %err, "skipping unreadable context image");
                continue;
            }
            output = odt::inject_image(&output, &image.name, &image.content)?;
        }
        Ok(output)
    }
}
