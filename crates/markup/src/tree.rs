//! Minimal XML tree with the mutation surface the mutators need
//!
//! Parses a part into elements with ordered attributes, supports
//! find-by-tag, rename, attribute edits, child append/replace, and
//! serializes back to text. Attribute and child order is preserved;
//! namespace prefixes are kept as literal name parts.

use crate::error::{MarkupError, MarkupResult};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Standard XML declaration emitted in front of rewritten parts
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// A node in the parsed tree
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

impl XmlNode {
    /// The contained element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        }
    }

    /// Mutable access to the contained element
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        }
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a single-rooted XML document (declaration and comments
    /// are skipped)
    pub fn parse_document(xml: &str) -> MarkupResult<Element> {
        let mut nodes = parse_fragment(xml)?;
        let root = nodes.iter().position(|n| n.as_element().is_some());
        match root {
            Some(index) => match nodes.swap_remove(index) {
                XmlNode::Element(el) => Ok(el),
                XmlNode::Text(_) => unreachable!(),
            },
            None => Err(MarkupError::InvalidStructure(
                "document has no root element".to_string(),
            )),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Rename the element, keeping attributes and children
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a child node
    pub fn append_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Child elements in order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First descendant element with the given name, depth-first
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`find`](Self::find)
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        for child in &mut self.children {
            if let XmlNode::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.find_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Concatenated descendant text
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(el) => out.push_str(&el.text()),
            }
        }
        out
    }

    /// Serialize the element and its subtree
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

/// Parse an XML fragment into a node sequence
pub fn parse_fragment(xml: &str) -> MarkupResult<Vec<XmlNode>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut top: Vec<XmlNode> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let el = element_from_start(e)?;
                stack.push(el);
            }
            Ok(Event::Empty(ref e)) => {
                let el = element_from_start(e)?;
                push_node(&mut stack, &mut top, XmlNode::Element(el));
            }
            Ok(Event::End(_)) => {
                let el = stack.pop().ok_or_else(|| {
                    MarkupError::InvalidStructure("unbalanced closing tag".to_string())
                })?;
                push_node(&mut stack, &mut top, XmlNode::Element(el));
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| MarkupError::Xml(err.to_string()))?
                    .into_owned();
                if !text.is_empty() {
                    push_node(&mut stack, &mut top, XmlNode::Text(text));
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_node(&mut stack, &mut top, XmlNode::Text(text));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declaration, comments, processing instructions
            Err(e) => return Err(MarkupError::from(e)),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(MarkupError::InvalidStructure(
            "unclosed element at end of input".to_string(),
        ));
    }
    Ok(top)
}

/// Serialize a node sequence
pub fn serialize_nodes(nodes: &[XmlNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            XmlNode::Element(el) => write_element(el, &mut out),
            XmlNode::Text(t) => out.push_str(&escape_text(t)),
        }
    }
    out
}

fn element_from_start(e: &quick_xml::events::BytesStart) -> MarkupResult<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| MarkupError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| MarkupError::Xml(err.to_string()))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn push_node(stack: &mut Vec<Element>, top: &mut Vec<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        match child {
            XmlNode::Element(inner) => write_element(inner, out),
            XmlNode::Text(t) => out.push_str(&escape_text(t)),
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape an attribute value
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
