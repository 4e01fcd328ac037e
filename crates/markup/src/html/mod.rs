//! HTML to OpenDocument markup transpiler
//!
//! Converts a constrained, well-formed HTML subset (the output of
//! rich-text fields) into ODT body markup. Each recognized tag maps
//! to exactly one native element; unrecognized tags pass through
//! unchanged with their children transformed.

use crate::error::MarkupResult;
use crate::id::ListIdSource;
use crate::odt::{
    BOLD_STYLE, ITALIC_STYLE, ORDERED_LIST_STYLE, UNDERLINE_STYLE, UNORDERED_LIST_STYLE,
};
use crate::tree::{serialize_nodes, Element, XmlNode};
use units::{parse_dimension, DXA_PER_PX};

/// Cap for the long edge of an `img` frame, in pixels
pub const IMG_MAX_PX: f64 = 640.0;

/// Convert an HTML fragment into ODT markup.
///
/// List ids come from the injected source; every `ul`/`ol` gets a
/// fresh one.
pub fn from_html(html: &str, ids: &mut dyn ListIdSource) -> MarkupResult<String> {
    let wrapped = format!("<html>{html}</html>");
    let root = Element::parse_document(&wrapped)?;
    let children = transform_children(root.children, ids)?;
    Ok(serialize_nodes(&children))
}

fn transform_children(
    children: Vec<XmlNode>,
    ids: &mut dyn ListIdSource,
) -> MarkupResult<Vec<XmlNode>> {
    children
        .into_iter()
        .map(|node| match node {
            XmlNode::Text(t) => Ok(XmlNode::Text(t)),
            XmlNode::Element(el) => Ok(XmlNode::Element(transform_element(&el, ids)?)),
        })
        .collect()
}

fn styled(name: &str, style: &str, children: Vec<XmlNode>) -> Element {
    let mut el = Element::new(name).with_attr("text:style-name", style);
    el.children = children;
    el
}

fn transform_element(el: &Element, ids: &mut dyn ListIdSource) -> MarkupResult<Element> {
    let children = transform_children(el.children.clone(), ids)?;

    let transformed = match el.name.as_str() {
        "p" => styled("text:p", "Standard", children),
        "strong" | "b" => styled("text:span", BOLD_STYLE, children),
        "em" | "i" => styled("text:span", ITALIC_STYLE, children),
        "u" => styled("text:span", UNDERLINE_STYLE, children),
        "pre" => styled("text:p", "Preformatted_20_Text", children),
        "code" => styled("text:span", "Preformatted_20_Text", children),
        "h1" | "h2" | "h3" => {
            let level = &el.name[1..];
            let mut heading = Element::new("text:h")
                .with_attr("text:style-name", format!("Heading_20_{level}"))
                .with_attr("text:outline-level", level);
            heading.children = children;
            heading
        }
        "ul" => {
            let mut list = styled("text:list", UNORDERED_LIST_STYLE, children);
            list.set_attr("xml:id", format!("list{}", ids.next_id()));
            list
        }
        "ol" => {
            let mut list = styled("text:list", ORDERED_LIST_STYLE, children);
            list.set_attr("xml:id", format!("list{}", ids.next_id()));
            list
        }
        "li" => {
            let mut item = Element::new("text:list-item");
            // list-item content must live inside a block container
            let has_block = children
                .first()
                .and_then(XmlNode::as_element)
                .map(|first| first.name == "text:p" || first.name == "text:h")
                .unwrap_or(false);
            if has_block {
                item.children = children;
            } else {
                item.append_child(XmlNode::Element(styled("text:p", "Standard", children)));
            }
            item
        }
        "a" => {
            let mut link = Element::new("text:a").with_attr("xlink:type", "simple");
            link.set_attr("xlink:href", el.attr("href").unwrap_or_default());
            link.children = children;
            link
        }
        "br" => Element::new("text:line-break"),
        "img" => image_frame(el)?,
        _ => {
            let mut passthrough = el.clone();
            passthrough.children = children;
            passthrough
        }
    };
    Ok(transformed)
}

/// Build a frame for an `img` tag: the `src` is copied into the
/// embedded reference and the long edge is capped at [`IMG_MAX_PX`],
/// preserving the declared aspect ratio.
fn image_frame(el: &Element) -> MarkupResult<Element> {
    let mut frame = Element::new("draw:frame")
        .with_attr("draw:name", el.attr("alt").unwrap_or("img1"))
        .with_attr("text:anchor-type", "paragraph");

    let width = el.attr("width").map(parse_html_size).transpose()?;
    let height = el.attr("height").map(parse_html_size).transpose()?;
    let cap = IMG_MAX_PX * DXA_PER_PX;
    match (width, height) {
        (Some(w), Some(h)) => {
            let scale = f64::min(1.0, cap / f64::max(w, h));
            frame.set_attr("svg:width", (w * scale).to_string());
            frame.set_attr("svg:height", (h * scale).to_string());
        }
        (Some(w), None) => frame.set_attr("svg:width", f64::min(w, cap).to_string()),
        (None, Some(h)) => frame.set_attr("svg:height", f64::min(h, cap).to_string()),
        (None, None) => {}
    }

    frame.append_child(XmlNode::Element(
        Element::new("draw:image")
            .with_attr("xlink:href", el.attr("src").unwrap_or_default())
            .with_attr("xlink:show", "embed")
            .with_attr("xlink:actuate", "onLoad"),
    ));
    Ok(frame)
}

/// Bare HTML size attributes are pixels; suffixed values go through
/// the regular dimension table
fn parse_html_size(raw: &str) -> units::UnitResult<f64> {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        parse_dimension(&format!("{raw}px"))
    } else {
        parse_dimension(raw)
    }
}
