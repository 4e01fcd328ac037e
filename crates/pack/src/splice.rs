//! Archive splicing
//!
//! Rewrites named entries inside a ZIP package while copying every
//! other entry raw, so untouched parts keep their exact bytes and
//! compression metadata, and entry order is preserved. The new
//! archive is assembled in memory; nothing partial ever escapes.

use crate::error::{PackError, PackResult};
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Rewrite the named entries of a package with new content.
///
/// Every key in `replacements` must name an existing entry; a miss
/// means the caller holds a malformed or wrong-type template and
/// fails the whole operation.
pub fn splice_archive(
    source: &[u8],
    replacements: &BTreeMap<String, Vec<u8>>,
) -> PackResult<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(source))?;

    for name in replacements.keys() {
        if !archive.file_names().any(|entry| entry == name) {
            return Err(PackError::MissingPart(name.clone()));
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        let name = entry.name().to_string();
        match replacements.get(&name) {
            Some(content) => {
                tracing::debug!(entry = %name, bytes = content.len(), "rewriting package entry");
                let options = SimpleFileOptions::default()
                    .compression_method(zip::CompressionMethod::Deflated);
                writer.start_file(&name, options)?;
                writer.write_all(content)?;
            }
            None => {
                writer.raw_copy_file(entry)?;
            }
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// Rewrite a single text part, UTF-8 encoded
pub fn splice_part(source: &[u8], part: &str, content: &str) -> PackResult<Vec<u8>> {
    let mut replacements = BTreeMap::new();
    replacements.insert(part.to_string(), content.as_bytes().to_vec());
    splice_archive(source, &replacements)
}

/// Append new binary entries to a package, preserving all existing
/// entries verbatim. An already-taken path is a caller error.
pub fn append_entries(source: &[u8], additions: &[(String, Vec<u8>)]) -> PackResult<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(source))?;

    for (name, _) in additions {
        if archive.file_names().any(|entry| entry == name) {
            return Err(PackError::DuplicateEntry(name.clone()));
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        writer.raw_copy_file(entry)?;
    }
    for (name, data) in additions {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored); // don't compress binary
        writer.start_file(name, options)?;
        writer.write_all(data)?;
    }

    Ok(writer.finish()?.into_inner())
}
