//! Minimal element tree built from quick-xml events

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{CemuError, Result};

/// One element with its concatenated text and child elements.
///
/// Attributes, comments and processing instructions are dropped; none of the
/// documents Meridian reads carry data in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name
    pub name: String,
    /// Text content directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child named `name`, whitespace included.
    pub fn child_raw_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Trimmed text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::trimmed_text)
    }

    /// Trimmed text of this element.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Every descendant named `name`, depth first, excluding `self`.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        let mut stack: Vec<&XmlNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.name == name {
                found.push(node);
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }
}

/// Parse `xml` into its root element.
///
/// # Errors
///
/// Returns [`CemuError::MalformedXml`] for syntax errors, unbalanced tags,
/// a missing root or content after the root element.
pub fn parse_document(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(&reader, e))?;
        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(CemuError::MalformedXml(
                        "content after the root element".to_string(),
                    ));
                }
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(XmlNode::named(name));
            }
            Event::Empty(empty) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, XmlNode::named(name))?;
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    return Err(CemuError::MalformedXml("unbalanced end tag".to_string()));
                };
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| malformed(&reader, e))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(CemuError::MalformedXml(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or_else(|| CemuError::MalformedXml("document has no root element".to_string()))
}

fn attach(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(CemuError::MalformedXml(
                "content after the root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn malformed(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> CemuError {
    CemuError::MalformedXml(format!(
        "{err} at byte {}",
        reader.buffer_position()
    ))
}
