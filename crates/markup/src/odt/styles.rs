//! Automatic style definitions for rendered ODT content
//!
//! The sentinel rewriters and the HTML filter emit spans and lists
//! referencing these styles by name, so the definitions must exist in
//! `office:automatic-styles`. Insertion is append-only and
//! deduplicated by `style:name`.

use crate::error::{MarkupError, MarkupResult};
use crate::tree::{Element, XmlNode};

/// Style name referenced by bold spans
pub const BOLD_STYLE: &str = "BOLD";
/// Style name referenced by italic spans
pub const ITALIC_STYLE: &str = "ITALIC";
/// Style name referenced by underline spans
pub const UNDERLINE_STYLE: &str = "UNDERLINE";
/// List style for unordered lists
pub const UNORDERED_LIST_STYLE: &str = "L1";
/// List style for ordered lists
pub const ORDERED_LIST_STYLE: &str = "L2";

fn text_style(name: &str, properties: &[(&str, &str)]) -> Element {
    let mut props = Element::new("style:text-properties");
    for (key, value) in properties {
        props.set_attr(*key, *value);
    }
    Element::new("style:style")
        .with_attr("style:name", name)
        .with_attr("style:family", "text")
        .with_child(XmlNode::Element(props))
}

/// Bold text style
pub fn bold_style() -> Element {
    text_style(
        BOLD_STYLE,
        &[
            ("fo:font-weight", "bold"),
            ("style:font-weight-asian", "bold"),
            ("style:font-weight-complex", "bold"),
        ],
    )
}

/// Italic text style
pub fn italic_style() -> Element {
    text_style(ITALIC_STYLE, &[("fo:font-style", "italic")])
}

/// Underline text style
pub fn underline_style() -> Element {
    text_style(
        UNDERLINE_STYLE,
        &[
            ("style:text-underline-style", "solid"),
            ("style:text-underline-width", "auto"),
            ("style:text-underline-color", "font-color"),
        ],
    )
}

fn list_level_properties(indent: &str) -> Element {
    Element::new("style:list-level-properties")
        .with_attr("text:list-level-position-and-space-mode", "label-alignment")
        .with_child(XmlNode::Element(
            Element::new("style:list-level-label-alignment")
                .with_attr("text:label-followed-by", "space")
                .with_attr("fo:text-indent", indent),
        ))
}

/// Bullet list style (one level)
pub fn unordered_list_style() -> Element {
    Element::new("text:list-style")
        .with_attr("style:name", UNORDERED_LIST_STYLE)
        .with_child(XmlNode::Element(
            Element::new("text:list-level-style-bullet")
                .with_attr("text:level", "1")
                .with_attr("text:bullet-char", "\u{2022}")
                .with_child(XmlNode::Element(list_level_properties("0.635cm"))),
        ))
}

/// Numbered list style (one level, "1." format)
pub fn ordered_list_style() -> Element {
    Element::new("text:list-style")
        .with_attr("style:name", ORDERED_LIST_STYLE)
        .with_child(XmlNode::Element(
            Element::new("text:list-level-style-number")
                .with_attr("text:level", "1")
                .with_attr("style:num-suffix", ".")
                .with_attr("style:num-format", "1")
                .with_child(XmlNode::Element(list_level_properties("0.435cm"))),
        ))
}

/// Insert every missing style definition into
/// `office:automatic-styles`, returning how many were added.
pub fn ensure_automatic_styles(root: &mut Element) -> MarkupResult<usize> {
    let styles = root.find_mut("office:automatic-styles").ok_or_else(|| {
        MarkupError::InvalidStructure("content has no office:automatic-styles".to_string())
    })?;

    let definitions = [
        bold_style(),
        italic_style(),
        underline_style(),
        unordered_list_style(),
        ordered_list_style(),
    ];

    let mut added = 0;
    for definition in definitions {
        let name = definition.attr("style:name").unwrap_or_default().to_string();
        let exists = styles
            .child_elements()
            .any(|el| el.attr("style:name") == Some(name.as_str()));
        if !exists {
            styles.append_child(XmlNode::Element(definition));
            added += 1;
        }
    }
    Ok(added)
}
