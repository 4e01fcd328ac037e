//! Package reading and format detection

use crate::error::{PackError, PackResult};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// The document formats a template package can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    /// WordprocessingML (.docx)
    Docx,
    /// OpenDocument text (.odt)
    Odt,
}

impl PackageFormat {
    /// Human-readable name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            PackageFormat::Docx => "docx",
            PackageFormat::Odt => "odt",
        }
    }
}

const ODT_MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

/// A wrapper around a ZIP archive for reading template packages
#[derive(Debug)]
pub struct PackageReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PackageReader {
    /// Open a package from its raw bytes. Checks the ZIP magic first
    /// so a spoofed extension fails with a format error rather than a
    /// confusing parse error.
    pub fn new(bytes: Vec<u8>) -> PackResult<Self> {
        if bytes.len() < 4 || &bytes[0..2] != b"PK" {
            return Err(PackError::Format("not a ZIP archive".to_string()));
        }
        let archive = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { archive })
    }

    /// Read a part from the archive as a string
    pub fn part_string(&mut self, path: &str) -> PackResult<String> {
        let bytes = self.part_bytes(path)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Read a part from the archive as bytes
    pub fn part_bytes(&mut self, path: &str) -> PackResult<Vec<u8>> {
        let mut file = self.archive.by_name(path).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                PackError::MissingPart(path.to_string())
            } else {
                PackError::from(e)
            }
        })?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Check if an entry exists in the archive
    pub fn has_entry(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Entry names in archive order
    pub fn entry_names(&self) -> Vec<String> {
        // file_names() iterates in central-directory hash order;
        // go through the index to keep the original order
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i))
            .map(str::to_string)
            .collect()
    }

    /// Detect the document format from the package's own declarations
    pub fn detect_format(&mut self) -> PackResult<PackageFormat> {
        if self.has_entry("mimetype") {
            let mimetype = self.part_string("mimetype")?;
            if mimetype.trim() == ODT_MIMETYPE {
                return Ok(PackageFormat::Odt);
            }
        }
        if self.has_entry("[Content_Types].xml") && self.has_entry("word/document.xml") {
            return Ok(PackageFormat::Docx);
        }
        Err(PackError::Format(
            "package matches no supported document format".to_string(),
        ))
    }

    /// Require the package to be of the given format
    pub fn expect_format(&mut self, expected: PackageFormat) -> PackResult<()> {
        let actual = self.detect_format()?;
        if actual != expected {
            return Err(PackError::Format(format!(
                "expected a {} package, found {}",
                expected.name(),
                actual.name()
            )));
        }
        Ok(())
    }
}
