//! Template directive helpers
//!
//! The host engine binds these to its tag/filter surface: an
//! image-embedding directive (sizing and anchor keywords), a
//! remote-image-by-URL directive, and an HTML-to-markup filter.
//! Argument parsing rejects unknown keywords by name.

use crate::context::ImageSpec;
use crate::error::{EngineError, EngineResult};
use crate::fetch::{fetch_image, FetchMethod};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use markup::{ListIdSource, RandomIdSource};
use units::{probe_image, resize, SizeTarget};

/// Default anchoring for embedded frames
pub const DEFAULT_ANCHOR: &str = "paragraph";

const IMAGE_KEYWORDS: &str = "width, height, max_width, max_height, anchor";

/// Parsed sizing and anchoring arguments of an image directive
#[derive(Debug, Clone, Default)]
pub struct ImageArgs {
    pub max_width: Option<String>,
    pub max_height: Option<String>,
    pub anchor: Option<String>,
}

impl ImageArgs {
    /// Parse directive keyword/value pairs. An unrecognized keyword
    /// fails by name so the template author can spot the typo.
    pub fn parse(directive: &'static str, pairs: &[(&str, &str)]) -> EngineResult<Self> {
        let mut args = Self::default();
        for (keyword, value) in pairs {
            match *keyword {
                "width" | "max_width" => args.max_width = Some(value.to_string()),
                "height" | "max_height" => args.max_height = Some(value.to_string()),
                "anchor" => args.anchor = Some(value.to_string()),
                _ => {
                    return Err(EngineError::DirectiveSyntax {
                        directive,
                        keyword: keyword.to_string(),
                        expected: IMAGE_KEYWORDS,
                    })
                }
            }
        }
        Ok(args)
    }

    fn anchor(&self) -> &str {
        self.anchor.as_deref().unwrap_or(DEFAULT_ANCHOR)
    }

    /// Directive keywords win over the sizes declared on the image
    /// spec itself
    fn bounds<'a>(&'a self, image: &'a ImageSpec) -> (Option<&'a str>, Option<&'a str>) {
        (
            self.max_width.as_deref().or(image.width.as_deref()),
            self.max_height.as_deref().or(image.height.as_deref()),
        )
    }
}

/// Drawing markup for an image embedded in a docx body
pub fn docx_image_tag(image: &ImageSpec, args: &ImageArgs) -> EngineResult<String> {
    let (max_width, max_height) = args.bounds(image);
    let (width, height) = resize(&image.content, max_width, max_height, SizeTarget::Docx)?;
    Ok(markup::docx::drawing_tag(
        &image.name,
        width.round() as i64,
        height.round() as i64,
    ))
}

/// Frame markup for an image embedded in an odt body
pub fn odt_image_tag(image: &ImageSpec, args: &ImageArgs) -> EngineResult<String> {
    let (max_width, max_height) = args.bounds(image);
    let (width, height) = resize(&image.content, max_width, max_height, SizeTarget::Odt)?;
    Ok(markup::odt::frame_tag(
        &image.name,
        width,
        height,
        args.anchor(),
    ))
}

/// Frame markup for a remote image in an odt body. The payload is
/// embedded inline as base64 so no package patching is needed; a
/// failed fetch or unreadable payload yields empty markup.
pub fn odt_image_url_tag(
    url: &str,
    method: FetchMethod,
    body: Option<&str>,
    args: &ImageArgs,
) -> EngineResult<String> {
    let Some(bytes) = fetch_image(url, method, body) else {
        return Ok(String::new());
    };
    if probe_image(&bytes).is_err() {
        tracing::warn!(url, "fetched payload is not an image, image omitted");
        return Ok(String::new());
    }
    let (max_width, max_height) = (args.max_width.as_deref(), args.max_height.as_deref());
    let (width, height) = resize(&bytes, max_width, max_height, SizeTarget::Odt)?;
    Ok(markup::odt::inline_frame_tag(
        width,
        height,
        &BASE64.encode(&bytes),
    ))
}

/// Data URI for a remote image in flat HTML output, or an empty
/// string when the fetch fails
pub fn flat_image_url_tag(url: &str, method: FetchMethod, body: Option<&str>) -> String {
    let Some(bytes) = fetch_image(url, method, body) else {
        return String::new();
    };
    let media_type = match probe_image(&bytes) {
        Ok(info) => info.subtype.media_type(),
        Err(err) => {
            tracing::warn!(url, error = %err, "fetched payload is not an image, image omitted");
            return String::new();
        }
    };
    format!("data:{};base64,{}", media_type, BASE64.encode(&bytes))
}

/// The HTML-to-markup filter for rich-text fields
pub fn html_convert(html: &str) -> EngineResult<String> {
    let mut ids = RandomIdSource;
    Ok(markup::html::from_html(html, &mut ids)?)
}

/// Variant of [`html_convert`] with an injected id source, for
/// deterministic output
pub fn html_convert_with_ids(html: &str, ids: &mut dyn ListIdSource) -> EngineResult<String> {
    Ok(markup::html::from_html(html, ids)?)
}

/// Suggested media name for an image spec, used when the caller did
/// not pick one: the spec name plus the probed subtype extension
pub fn media_name(image: &ImageSpec) -> EngineResult<String> {
    if image.name.contains('.') {
        return Ok(image.name.clone());
    }
    let info = probe_image(&image.content)?;
    Ok(format!("{}.{}", image.name, info.subtype.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0, 0, 0, 13]);
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn test_parse_known_keywords() {
        let args = ImageArgs::parse(
            "image",
            &[("max_width", "12pt"), ("anchor", "as-char")],
        )
        .unwrap();
        assert_eq!(args.max_width.as_deref(), Some("12pt"));
        assert_eq!(args.anchor(), "as-char");
    }

    #[test]
    fn test_unknown_keyword_named_in_error() {
        let err = ImageArgs::parse("image", &[("widht", "12pt")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("widht"));
        assert!(message.contains("image"));
    }

    #[test]
    fn test_odt_tag_auto_fits_page_box() {
        let image = ImageSpec::new("a.png", png_bytes(2000, 1000));
        let xml = odt_image_tag(&image, &ImageArgs::default()).unwrap();
        assert!(xml.contains("svg:width=\"16697\""));
        assert!(xml.contains("xlink:href=\"Pictures/a.png\""));
        assert!(xml.contains("text:anchor-type=\"paragraph\""));
    }

    #[test]
    fn test_docx_tag_constraint_applied() {
        let mut image = ImageSpec::new("a.png", png_bytes(100, 50));
        image.width = Some("1in".to_string());
        let xml = docx_image_tag(&image, &ImageArgs::default()).unwrap();
        assert!(xml.contains("cx=\"914400\" cy=\"457200\""));
        assert!(xml.contains("r:embed=\"a.png\""));
    }

    #[test]
    fn test_directive_bounds_override_spec() {
        let mut image = ImageSpec::new("a.png", png_bytes(100, 50));
        image.width = Some("1in".to_string());
        let args = ImageArgs::parse("image", &[("width", "720in")]).unwrap();
        // Huge directive bound: intrinsic size wins, not the spec's 1in
        let xml = docx_image_tag(&image, &args).unwrap();
        assert!(xml.contains("cx=\"952500\""));
    }

    #[test]
    fn test_invalid_dimension_fatal() {
        let mut image = ImageSpec::new("a.png", png_bytes(100, 50));
        image.width = Some("12parsecs".to_string());
        let err = odt_image_tag(&image, &ImageArgs::default()).unwrap_err();
        assert!(err.to_string().contains("12parsecs"));
    }

    #[test]
    fn test_url_tag_degrades_to_empty() {
        let out = odt_image_url_tag(
            "http://img.invalid/x.png",
            FetchMethod::Get,
            None,
            &ImageArgs::default(),
        )
        .unwrap();
        assert!(out.is_empty());
        assert!(flat_image_url_tag("http://img.invalid/x.png", FetchMethod::Get, None).is_empty());
    }

    #[test]
    fn test_html_convert_deterministic_ids() {
        let mut ids = markup::SequentialIdSource::new(5);
        let out = html_convert_with_ids("<ul><li>a</li></ul>", &mut ids).unwrap();
        assert!(out.contains("xml:id=\"list5\""));
    }

    #[test]
    fn test_media_name_extension_inferred() {
        let image = ImageSpec::new("logo", png_bytes(10, 10));
        assert_eq!(media_name(&image).unwrap(), "logo.png");
        let named = ImageSpec::new("logo.gif", vec![]);
        assert_eq!(media_name(&named).unwrap(), "logo.gif");
    }
}
