//! A small XML tree abstraction over quick-xml.
//!
//! Slide and relationship parts are parsed into [`XmlNode`] trees with
//! namespace prefixes stripped to local names, so the extraction steps are
//! pure functions over plain trees and can be tested against synthetic
//! trees built with the [`XmlNode::element`] builder.

use deckdoc_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A tagged XML node: local name, attributes, children, and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// Start building an element with the given local name.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Builder: set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Local element name (namespace prefix removed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct text content of this node.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value by local name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All descendants (including this node) with the given local name,
    /// in document (pre-order) order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_descendants(name, found);
        }
    }

    /// Parse an XML document into its root element.
    pub fn parse(xml: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        // Sentinel root collects top-level elements.
        let mut stack: Vec<XmlNode> = vec![XmlNode::element("#document")];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(node_from_start(e)),
                Ok(Event::Empty(ref e)) => {
                    let node = node_from_start(e);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("bad text content: {}", e)))?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::End(_)) => {
                    let node = match stack.pop() {
                        Some(node) if !stack.is_empty() => node,
                        _ => return Err(Error::XmlError("unbalanced closing tag".to_string())),
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlError(format!("malformed XML: {}", e))),
                _ => {}
            }
        }

        let mut document = match stack.pop() {
            Some(document) if stack.is_empty() => document,
            _ => return Err(Error::XmlError("unclosed element at end of input".to_string())),
        };
        if document.children.is_empty() {
            return Err(Error::XmlError("document has no root element".to_string()));
        }
        Ok(document.children.remove(0))
    }
}

/// Build a node from a start/empty tag, stripping namespace prefixes from
/// the element name and every attribute key.
fn node_from_start(e: &BytesStart<'_>) -> XmlNode {
    let name = String::from_utf8_lossy(local_name(e.name().as_ref())).to_string();
    let mut node = XmlNode::element(name);

    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        node.attrs.push((key, value));
    }

    node
}

/// Extract the local name from a potentially namespaced XML name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
