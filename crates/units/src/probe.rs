//! Image header probing
//!
//! Reads intrinsic pixel dimensions and the media subtype from the
//! first bytes of PNG, JPEG, and GIF payloads. No decoding beyond the
//! header.

use crate::error::{UnitError, UnitResult};

/// Media subtype of a probed image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSubtype {
    Png,
    Jpeg,
    Gif,
}

impl ImageSubtype {
    /// The canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageSubtype::Png => "png",
            ImageSubtype::Jpeg => "jpeg",
            ImageSubtype::Gif => "gif",
        }
    }

    /// The media type used in manifests and content-type declarations
    pub fn media_type(self) -> &'static str {
        match self {
            ImageSubtype::Png => "image/png",
            ImageSubtype::Jpeg => "image/jpeg",
            ImageSubtype::Gif => "image/gif",
        }
    }

    /// Map a file extension to a media type, for formats where the
    /// manifest entry is derived from the media file name
    pub fn media_type_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

/// Intrinsic properties read from an image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub subtype: ImageSubtype,
}

/// Probe image bytes for their intrinsic pixel size and subtype
pub fn probe_image(data: &[u8]) -> UnitResult<ImageInfo> {
    if let Some((width, height)) = png_dimensions(data) {
        return Ok(ImageInfo { width, height, subtype: ImageSubtype::Png });
    }
    if let Some((width, height)) = gif_dimensions(data) {
        return Ok(ImageInfo { width, height, subtype: ImageSubtype::Gif });
    }
    if let Some((width, height)) = jpeg_dimensions(data) {
        return Ok(ImageInfo { width, height, subtype: ImageSubtype::Jpeg });
    }
    Err(UnitError::UnreadableImage(
        "no PNG, JPEG, or GIF signature".to_string(),
    ))
}

/// PNG: 8-byte signature, then the IHDR chunk holds width and height
fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() >= 24 && &data[0..8] == b"\x89PNG\r\n\x1a\n" {
        let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
        return Some((width, height));
    }
    None
}

/// GIF: "GIF87a"/"GIF89a" followed by little-endian width and height
fn gif_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() >= 10 && (&data[0..6] == b"GIF87a" || &data[0..6] == b"GIF89a") {
        let width = u16::from_le_bytes([data[6], data[7]]) as u32;
        let height = u16::from_le_bytes([data[8], data[9]]) as u32;
        return Some((width, height));
    }
    None
}

/// JPEG: scan for an SOF0/SOF2 marker and read its size fields
fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] == 0xFF {
            let marker = data[i + 1];
            if marker == 0xC0 || marker == 0xC2 {
                let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                return Some((width, height));
            } else if marker != 0xFF && marker != 0x00 && marker != 0xD8 && marker != 0xD9 {
                if i + 3 < data.len() {
                    let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                    i += 2 + len;
                    continue;
                }
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0, 0, 0, 13]); // IHDR length
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn test_probe_png() {
        let info = probe_image(&png_bytes(100, 50)).unwrap();
        assert_eq!(info.width, 100);
        assert_eq!(info.height, 50);
        assert_eq!(info.subtype, ImageSubtype::Png);
    }

    #[test]
    fn test_probe_gif() {
        let mut data = b"GIF89a".to_vec();
        data.extend_from_slice(&200u16.to_le_bytes());
        data.extend_from_slice(&150u16.to_le_bytes());
        let info = probe_image(&data).unwrap();
        assert_eq!((info.width, info.height), (200, 150));
        assert_eq!(info.subtype, ImageSubtype::Gif);
    }

    #[test]
    fn test_probe_jpeg() {
        // SOI then a bare SOF0 with 64x32
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x0B, 0x08]);
        data.extend_from_slice(&32u16.to_be_bytes()); // height
        data.extend_from_slice(&64u16.to_be_bytes()); // width
        data.extend_from_slice(&[0x01, 0x00]);
        let info = probe_image(&data).unwrap();
        assert_eq!((info.width, info.height), (64, 32));
        assert_eq!(info.subtype, ImageSubtype::Jpeg);
    }

    #[test]
    fn test_probe_rejects_garbage() {
        assert!(probe_image(b"not an image at all").is_err());
        assert!(probe_image(&[]).is_err());
    }

    #[test]
    fn test_media_type_for_extension() {
        assert_eq!(ImageSubtype::media_type_for_extension("png"), "image/png");
        assert_eq!(ImageSubtype::media_type_for_extension("JPG"), "image/jpeg");
        assert_eq!(
            ImageSubtype::media_type_for_extension("xyz"),
            "application/octet-stream"
        );
    }
}
