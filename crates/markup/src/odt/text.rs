//! Text-node rewriting for OpenDocument content
//!
//! Handles the two sentinel kinds inside text nodes (raw `\n` and
//! `<b>`/`</b>` pairs, which the tree parser has already unescaped)
//! and unwraps `text:text-input` placeholders left by template
//! authoring.

use crate::odt::styles::BOLD_STYLE;
use crate::tree::{Element, XmlNode};

/// Bold span start sentinel, as it appears in parsed text nodes
pub const BOLD_START: &str = "<b>";
/// Bold span stop sentinel
pub const BOLD_STOP: &str = "</b>";

/// Elements whose text must not be rewritten (binary payloads)
const OPAQUE_ELEMENTS: &[&str] = &["office:binary-data"];

/// Rewrite sentinel markers in every text node of the subtree.
///
/// `\n` becomes `<text:line-break/>`; a bold span becomes a
/// `text:span` referencing the BOLD automatic style. A bold span
/// never crosses a text-node boundary: an unpaired start marker bolds
/// the remainder of its node.
pub fn rewrite_sentinels(el: &mut Element) {
    if OPAQUE_ELEMENTS.contains(&el.name.as_str()) {
        return;
    }
    let mut rewritten = Vec::with_capacity(el.children.len());
    for child in el.children.drain(..) {
        match child {
            XmlNode::Element(mut inner) => {
                rewrite_sentinels(&mut inner);
                rewritten.push(XmlNode::Element(inner));
            }
            XmlNode::Text(text) => {
                if text.contains('\n') || text.contains(BOLD_START) || text.contains(BOLD_STOP) {
                    rewritten.extend(split_text(&text));
                } else {
                    rewritten.push(XmlNode::Text(text));
                }
            }
        }
    }
    el.children = rewritten;
}

/// Split one text payload into text, line-break, and bold-span nodes
fn split_text(text: &str) -> Vec<XmlNode> {
    let mut nodes = Vec::new();
    let mut bold = false;
    let mut rest = text;

    while !rest.is_empty() {
        let next_break = rest.find('\n');
        let next_marker = if bold { rest.find(BOLD_STOP) } else { rest.find(BOLD_START) };

        let (pos, kind) = match (next_break, next_marker) {
            (Some(b), Some(m)) if b < m => (b, Token::Break),
            (Some(_), Some(m)) => (m, Token::Toggle),
            (Some(b), None) => (b, Token::Break),
            (None, Some(m)) => (m, Token::Toggle),
            (None, None) => {
                push_segment(&mut nodes, rest, bold);
                break;
            }
        };

        push_segment(&mut nodes, &rest[..pos], bold);
        match kind {
            Token::Break => {
                nodes.push(XmlNode::Element(Element::new("text:line-break")));
                rest = &rest[pos + 1..];
            }
            Token::Toggle => {
                let marker_len = if bold { BOLD_STOP.len() } else { BOLD_START.len() };
                bold = !bold;
                rest = &rest[pos + marker_len..];
            }
        }
    }
    nodes
}

enum Token {
    Break,
    Toggle,
}

fn push_segment(nodes: &mut Vec<XmlNode>, segment: &str, bold: bool) {
    if segment.is_empty() {
        return;
    }
    if bold {
        nodes.push(XmlNode::Element(
            Element::new("text:span")
                .with_attr("text:style-name", BOLD_STYLE)
                .with_child(XmlNode::Text(segment.to_string())),
        ));
    } else {
        nodes.push(XmlNode::Text(segment.to_string()));
    }
}

/// Unwrap every `text:text-input` placeholder in the subtree.
///
/// Inline contents replace the input element in place. Contents that
/// contain block elements (`text:p`) are hoisted after the enclosing
/// paragraph, because a paragraph cannot nest inside another.
pub fn unwrap_text_inputs(el: &mut Element) {
    let mut index = 0;
    while index < el.children.len() {
        let is_paragraph = matches!(
            &el.children[index],
            XmlNode::Element(child) if child.name == "text:p"
        );
        if is_paragraph {
            let mut hoisted = Vec::new();
            if let XmlNode::Element(paragraph) = &mut el.children[index] {
                extract_inputs(paragraph, &mut hoisted);
            }
            let count = hoisted.len();
            for (offset, node) in hoisted.into_iter().enumerate() {
                el.children.insert(index + 1 + offset, node);
            }
            index += 1 + count;
            continue;
        }
        if let XmlNode::Element(child) = &mut el.children[index] {
            unwrap_text_inputs(child);
        }
        index += 1;
    }
}

fn extract_inputs(el: &mut Element, hoisted: &mut Vec<XmlNode>) {
    let mut index = 0;
    while index < el.children.len() {
        let is_input = matches!(
            &el.children[index],
            XmlNode::Element(child) if child.name == "text:text-input"
        );
        if is_input {
            let removed = el.children.remove(index);
            let XmlNode::Element(input) = removed else { unreachable!() };
            let has_block = input
                .child_elements()
                .any(|child| child.name == "text:p" || child.name == "text:h");
            if has_block {
                hoisted.extend(input.children);
            } else {
                let count = input.children.len();
                for (offset, node) in input.children.into_iter().enumerate() {
                    el.children.insert(index + offset, node);
                }
                index += count;
            }
            continue;
        }
        if let XmlNode::Element(child) = &mut el.children[index] {
            extract_inputs(child, hoisted);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Element;

    fn paragraph(text: &str) -> Element {
        Element::parse_document(&format!("<text:p>{}</text:p>", text)).unwrap()
    }

    #[test]
    fn test_line_break_rewritten() {
        let mut p = paragraph("Michel\nPierre");
        rewrite_sentinels(&mut p);
        assert_eq!(p.to_xml(), "<text:p>Michel<text:line-break/>Pierre</text:p>");
    }

    #[test]
    fn test_bold_span_rewritten() {
        let mut p = paragraph("pre&lt;b&gt;fat&lt;/b&gt;post");
        rewrite_sentinels(&mut p);
        assert_eq!(
            p.to_xml(),
            "<text:p>pre<text:span text:style-name=\"BOLD\">fat</text:span>post</text:p>"
        );
    }

    #[test]
    fn test_bold_span_with_break_inside() {
        let mut p = paragraph("&lt;b&gt;a\nb&lt;/b&gt;");
        rewrite_sentinels(&mut p);
        assert_eq!(
            p.to_xml(),
            concat!(
                "<text:p><text:span text:style-name=\"BOLD\">a</text:span>",
                "<text:line-break/>",
                "<text:span text:style-name=\"BOLD\">b</text:span></text:p>"
            )
        );
    }

    #[test]
    fn test_unpaired_bold_start_bolds_rest_of_node() {
        let mut p = paragraph("plain&lt;b&gt;rest");
        rewrite_sentinels(&mut p);
        assert_eq!(
            p.to_xml(),
            "<text:p>plain<text:span text:style-name=\"BOLD\">rest</text:span></text:p>"
        );
    }

    #[test]
    fn test_unpaired_bold_stop_is_noop() {
        let mut p = paragraph("a&lt;/b&gt;b");
        rewrite_sentinels(&mut p);
        assert_eq!(p.to_xml(), "<text:p>ab</text:p>");
    }

    #[test]
    fn test_nested_spans_visited() {
        let mut p = paragraph("<text:span>x\ny</text:span>");
        rewrite_sentinels(&mut p);
        assert_eq!(
            p.to_xml(),
            "<text:p><text:span>x<text:line-break/>y</text:span></text:p>"
        );
    }

    #[test]
    fn test_binary_data_left_alone() {
        let xml = "<draw:image><office:binary-data>AAAA\nBBBB</office:binary-data></draw:image>";
        let mut el = Element::parse_document(xml).unwrap();
        rewrite_sentinels(&mut el);
        assert_eq!(el.to_xml(), xml);
    }

    #[test]
    fn test_inline_input_unwrapped_in_place() {
        let xml = "<office:text><text:p>a<text:text-input text:description=\"\">X</text:text-input>b</text:p></office:text>";
        let mut root = Element::parse_document(xml).unwrap();
        unwrap_text_inputs(&mut root);
        assert_eq!(root.to_xml(), "<office:text><text:p>aXb</text:p></office:text>");
    }

    #[test]
    fn test_block_input_hoisted_after_paragraph() {
        let xml = concat!(
            "<office:text>",
            "<text:p>before<text:text-input><text:p>block</text:p></text:text-input></text:p>",
            "<text:p>after</text:p>",
            "</office:text>"
        );
        let mut root = Element::parse_document(xml).unwrap();
        unwrap_text_inputs(&mut root);
        assert_eq!(
            root.to_xml(),
            concat!(
                "<office:text>",
                "<text:p>before</text:p>",
                "<text:p>block</text:p>",
                "<text:p>after</text:p>",
                "</office:text>"
            )
        );
    }
}
