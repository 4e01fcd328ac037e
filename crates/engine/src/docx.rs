//! WordprocessingML render pipeline
//!
//! Resolve the template, verify its format, extract the body part,
//! delegate to the host engine, rewrite sentinels, inject context
//! images, and splice everything back into the package.

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::error::EngineResult;
use crate::host::HostEngine;
use crate::resolve::resolve;
use markup::docx::{self, DOCUMENT_PART};
use pack::{splice_part, PackageFormat, PackageReader};
use units::probe_image;

/// Renders docx template packages
pub struct DocxEngine<H: HostEngine> {
    config: EngineConfig,
    host: H,
}

impl<H: HostEngine> DocxEngine<H> {
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
        reader.expect_format(PackageFormat::Docx)?;

        let source = reader.part_string(DOCUMENT_PART)?;
        let rendered = self.host.render(&source, context)?;
        let cleaned = docx::clean(&rendered);
        tracing::debug!(part = DOCUMENT_PART, bytes = cleaned.len(), "docx body rendered");

        let mut output = splice_part(package, DOCUMENT_PART, &cleaned)?;
        for image in context.images.values() {
            if let Err(err) = probe_image(&image.content) {
                tracing::warn!(image = %image.name, error = %err, "skipping unreadable context image");
                continue;
            }
            output = docx::inject_image(&output, &image.name, &image.content)?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ImageSpec;
    use crate::error::{EngineError, EngineResult};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Trivial `{{ key }}` substitution stand-in for the host engine
    struct SubstHost;

    impl HostEngine for SubstHost {
        fn render(&self, source: &str, context: &RenderContext) -> EngineResult<String> {
            let mut out = source.to_string();
            for (key, value) in &context.vars {
                let needle = format!("{{{{ {key} }}}}");
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                out = out.replace(&needle, &text);
            }
            Ok(out)
        }
    }

    const DOCUMENT: &str = concat!(
        "<w:document><w:body>",
        "<w:p><w:r><w:t>{{ name }}</w:t></w:r></w:p>",
        "</w:body></w:document>"
    );

    const RELS: &str = concat!(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        "<Relationship Id=\"rId1\" Type=\"urn:styles\" Target=\"styles.xml\"/>",
        "</Relationships>"
    );

    fn docx_package() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(DOCUMENT.as_bytes()).unwrap();
        writer.start_file("word/_rels/document.xml.rels", options).unwrap();
        writer.write_all(RELS.as_bytes()).unwrap();
        writer.start_file("word/settings.xml", options).unwrap();
        writer.write_all(b"<w:settings/>").unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn engine() -> DocxEngine<SubstHost> {
        DocxEngine::new(EngineConfig::default(), SubstHost)
    }

    #[test]
    fn test_newline_var_becomes_break_element() {
        let context = RenderContext::new().with_var("name", "Michel\nPierre");
        let output = engine().render_package(&docx_package(), &context).unwrap();

        let mut reader = PackageReader::new(output).unwrap();
        let body = reader.part_string(DOCUMENT_PART).unwrap();
        assert!(body.contains("<w:t>Michel</w:t><w:br/><w:t>Pierre</w:t>"));
        assert!(!body.contains('\n'));
    }

    #[test]
    fn test_untouched_entries_preserved() {
        let context = RenderContext::new().with_var("name", "x");
        let output = engine().render_package(&docx_package(), &context).unwrap();

        let mut reader = PackageReader::new(output).unwrap();
        assert_eq!(reader.part_bytes("word/settings.xml").unwrap(), b"<w:settings/>");
        assert_eq!(reader.part_bytes("[Content_Types].xml").unwrap(), b"<Types/>");
    }

    #[test]
    fn test_context_image_injected() {
        let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
        png.extend_from_slice(b"IHDR");
        png.extend_from_slice(&100u32.to_be_bytes());
        png.extend_from_slice(&50u32.to_be_bytes());

        let context = RenderContext::new()
            .with_var("name", "x")
            .with_image(ImageSpec::new("michel1.png", png));
        let output = engine().render_package(&docx_package(), &context).unwrap();

        let mut reader = PackageReader::new(output).unwrap();
        assert!(reader.has_entry("word/media/michel1.png"));
        let rels = reader.part_string("word/_rels/document.xml.rels").unwrap();
        assert!(rels.contains("Target=\"media/michel1.png\""));
    }

    #[test]
    fn test_unreadable_image_skipped_not_fatal() {
        let context = RenderContext::new()
            .with_var("name", "x")
            .with_image(ImageSpec::new("bad.png", b"not an image".to_vec()));
        let output = engine().render_package(&docx_package(), &context).unwrap();

        let reader = PackageReader::new(output).unwrap();
        assert!(!reader.has_entry("word/media/bad.png"));
    }

    #[test]
    fn test_wrong_format_is_fatal() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("mimetype", options).unwrap();
        writer
            .write_all(b"application/vnd.oasis.opendocument.text")
            .unwrap();
        let odt = writer.finish().unwrap().into_inner();

        let err = engine()
            .render_package(&odt, &RenderContext::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Pack(pack::PackError::Format(_))));
    }
}
