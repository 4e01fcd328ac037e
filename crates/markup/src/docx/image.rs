//! Image injection for WordprocessingML packages
//!
//! Adds the binary under word/media/ and appends one matching
//! `<Relationship>` to the document relationships part. Appending is
//! the only mutation: existing relationships keep their bytes and
//! order.

use crate::docx::{IMAGE_REL_TYPE, MEDIA_DIR, RELS_PART};
use crate::error::{MarkupError, MarkupResult};
use crate::tree::escape_attr;
use pack::{append_entries, splice_part, PackageReader};

/// Inject an image into a docx package.
///
/// The relationship id equals the image name, which is also what the
/// drawing markup references, so the caller must keep names unique.
pub fn inject_image(package: &[u8], name: &str, content: &[u8]) -> MarkupResult<Vec<u8>> {
    let mut reader = PackageReader::new(package.to_vec())?;
    let media_path = format!("{MEDIA_DIR}/{name}");
    if reader.has_entry(&media_path) {
        return Err(MarkupError::DuplicateImageName(name.to_string()));
    }

    let rels = reader.part_string(RELS_PART)?;
    let entry = format!(
        r#"<Relationship Id="{id}" Type="{IMAGE_REL_TYPE}" Target="media/{id}"/>"#,
        id = escape_attr(name),
    );
    let close = "</Relationships>";
    let patched = match rels.rfind(close) {
        Some(pos) => format!("{}{}{}", &rels[..pos], entry, &rels[pos..]),
        None => {
            return Err(MarkupError::InvalidStructure(
                "relationships part has no closing element".to_string(),
            ))
        }
    };

    let spliced = splice_part(package, RELS_PART, &patched)?;
    Ok(append_entries(&spliced, &[(media_path, content.to_vec())])?)
}

/// Drawing markup for the image directive.
///
/// Closes the current run and paragraph, emits an anchored drawing in
/// its own paragraph, and reopens a run, because the directive sits
/// inside `<w:t>` text when the host engine expands it.
pub fn drawing_tag(rel_id: &str, width_emu: i64, height_emu: i64) -> String {
    format!(
        concat!(
            "</w:t></w:r></w:p>",
            "<w:p><w:r><w:drawing>",
            "<wp:anchor behindDoc=\"0\" distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\"",
            " simplePos=\"0\" locked=\"0\" layoutInCell=\"1\" allowOverlap=\"1\" relativeHeight=\"2\">",
            "<a:graphic xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">",
            "<a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">",
            "<pic:pic xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">",
            "<pic:blipFill>",
            "<a:blip r:embed=\"{id}\"/>",
            "<a:stretch><a:fillRect/></a:stretch>",
            "</pic:blipFill>",
            "<pic:spPr bwMode=\"auto\">",
            "<a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>",
            "<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>",
            "</pic:spPr>",
            "</pic:pic>",
            "</a:graphicData>",
            "</a:graphic>",
            "</wp:anchor>",
            "</w:drawing></w:r></w:p>",
            "<w:p><w:r><w:t>",
        ),
        id = escape_attr(rel_id),
        cx = width_emu,
        cy = height_emu,
    )
}
