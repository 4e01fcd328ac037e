//! Image injection for OpenDocument packages
//!
//! Adds the binary under Pictures/ and appends one matching
//! `manifest:file-entry` to META-INF/manifest.xml. Appending is the
//! only mutation; every existing manifest entry keeps its order.

use crate::error::{MarkupError, MarkupResult};
use crate::odt::{MANIFEST_PART, PICTURES_DIR};
use crate::tree::{escape_attr, Element, XmlNode, XML_DECLARATION};
use pack::{append_entries, splice_part, PackageReader};
use units::ImageSubtype;

/// Inject an image into an odt package.
///
/// The manifest full-path equals `Pictures/<name>`, which is also
/// what `draw:image` markup references, so the caller must keep
/// names unique.
pub fn inject_image(package: &[u8], name: &str, content: &[u8]) -> MarkupResult<Vec<u8>> {
    let mut reader = PackageReader::new(package.to_vec())?;
    let media_path = format!("{PICTURES_DIR}/{name}");
    if reader.has_entry(&media_path) {
        return Err(MarkupError::DuplicateImageName(name.to_string()));
    }

    let manifest_xml = reader.part_string(MANIFEST_PART)?;
    let mut manifest = Element::parse_document(&manifest_xml)?;
    if manifest.name != "manifest:manifest" {
        return Err(MarkupError::InvalidStructure(
            "manifest part has no manifest:manifest root".to_string(),
        ));
    }
    if manifest
        .child_elements()
        .any(|el| el.attr("manifest:full-path") == Some(media_path.as_str()))
    {
        return Err(MarkupError::DuplicateImageName(name.to_string()));
    }

    let extension = name.rsplit('.').next().unwrap_or_default();
    manifest.append_child(XmlNode::Element(
        Element::new("manifest:file-entry")
            .with_attr("manifest:full-path", media_path.as_str())
            .with_attr(
                "manifest:media-type",
                ImageSubtype::media_type_for_extension(extension),
            ),
    ));

    let patched = format!("{}{}", XML_DECLARATION, manifest.to_xml());
    let spliced = splice_part(package, MANIFEST_PART, &patched)?;
    Ok(append_entries(&spliced, &[(media_path, content.to_vec())])?)
}

/// Frame markup referencing an injected picture, for the image
/// directive. Sizes are in dxa, anchored as requested (paragraph by
/// default).
pub fn frame_tag(name: &str, width: f64, height: f64, anchor: &str) -> String {
    format!(
        concat!(
            "<draw:frame draw:name=\"{name}\" svg:width=\"{w}\" svg:height=\"{h}\"",
            " text:anchor-type=\"{anchor}\" draw:z-index=\"0\">",
            "<draw:image xlink:href=\"Pictures/{name}\" xlink:show=\"embed\" xlink:actuate=\"onLoad\"/>",
            "</draw:frame>",
        ),
        name = escape_attr(name),
        w = width,
        h = height,
        anchor = escape_attr(anchor),
    )
}

/// Frame markup with the image payload embedded as base64, for
/// directives that do not patch the package
pub fn inline_frame_tag(width: f64, height: f64, base64_payload: &str) -> String {
    format!(
        concat!(
            "<draw:frame draw:name=\"img1\" svg:width=\"{w}\" svg:height=\"{h}\">",
            "<draw:image xlink:type=\"simple\" xlink:show=\"embed\" xlink:actuate=\"onLoad\">",
            "<office:binary-data>{payload}</office:binary-data>",
            "</draw:image></draw:frame>",
        ),
        w = width,
        h = height,
        payload = base64_payload,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const MANIFEST_BASE: &str = concat!(
        "<manifest:manifest xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\">",
        "<manifest:file-entry manifest:full-path=\"/\" manifest:media-type=\"application/vnd.oasis.opendocument.text\"/>",
        "<manifest:file-entry manifest:full-path=\"content.xml\" manifest:media-type=\"text/xml\"/>",
        "</manifest:manifest>"
    );

    fn odt_package() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("mimetype", options).unwrap();
        writer
            .write_all(b"application/vnd.oasis.opendocument.text")
            .unwrap();
        writer.start_file("content.xml", options).unwrap();
        writer.write_all(b"<office:document-content/>").unwrap();
        writer.start_file(MANIFEST_PART, options).unwrap();
        writer.write_all(MANIFEST_BASE.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_inject_adds_picture_and_manifest_entry() {
        let package = odt_package();
        let result = inject_image(&package, "michel1.png", &[1, 2, 3]).unwrap();

        let mut reader = PackageReader::new(result).unwrap();
        assert_eq!(reader.part_bytes("Pictures/michel1.png").unwrap(), vec![1, 2, 3]);

        let manifest = reader.part_string(MANIFEST_PART).unwrap();
        assert!(manifest.contains("manifest:full-path=\"Pictures/michel1.png\""));
        assert!(manifest.contains("manifest:media-type=\"image/png\""));
    }

    #[test]
    fn test_existing_manifest_entries_keep_order() {
        let package = odt_package();
        let result = inject_image(&package, "a.png", &[1]).unwrap();
        let mut reader = PackageReader::new(result).unwrap();
        let manifest = reader.part_string(MANIFEST_PART).unwrap();
        let root_pos = manifest.find("manifest:full-path=\"/\"").unwrap();
        let content_pos = manifest.find("manifest:full-path=\"content.xml\"").unwrap();
        let new_pos = manifest.find("manifest:full-path=\"Pictures/a.png\"").unwrap();
        assert!(root_pos < content_pos && content_pos < new_pos);
    }

    #[test]
    fn test_inject_n_images_yields_n_entries() {
        let mut package = odt_package();
        for name in ["a.png", "b.jpeg", "c.gif"] {
            package = inject_image(&package, name, &[0]).unwrap();
        }
        let mut reader = PackageReader::new(package).unwrap();
        let manifest = reader.part_string(MANIFEST_PART).unwrap();
        assert_eq!(manifest.matches("Pictures/").count(), 3);
        assert!(manifest.contains("manifest:media-type=\"image/jpeg\""));
        assert!(manifest.contains("manifest:media-type=\"image/gif\""));
    }

    #[test]
    fn test_duplicate_name_fails() {
        let package = odt_package();
        let once = inject_image(&package, "a.png", &[1]).unwrap();
        let err = inject_image(&once, "a.png", &[1]).unwrap_err();
        assert!(matches!(err, MarkupError::DuplicateImageName(ref n) if n == "a.png"));
    }

    #[test]
    fn test_frame_tag_references_picture() {
        let xml = frame_tag("img.png", 16697.0, 5763.5, "paragraph");
        assert!(xml.contains("xlink:href=\"Pictures/img.png\""));
        assert!(xml.contains("svg:width=\"16697\""));
        assert!(xml.contains("text:anchor-type=\"paragraph\""));
    }

    #[test]
    fn test_inline_frame_embeds_payload() {
        let xml = inline_frame_tag(100.0, 50.0, "QUJD");
        assert!(xml.contains("<office:binary-data>QUJD</office:binary-data>"));
    }
}
