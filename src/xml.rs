//! Generic XML tree decoding for docProps parts.
//!
//! The property mappers do not care about the XML schema of the part they
//! read, only about its shape: elements become mapping nodes, attributes
//! collect under a reserved sub-mapping, and repeated sibling elements
//! always form an ordered sequence, even when a single instance is present.
//! This keeps path lookups independent of cardinality surprises.
//!
//! Decoding consumes the full part content and produces an immutable tree;
//! lookups are explicit traversals that return `Option`, never a wildcard
//! match.

use crate::error::{DocPropsError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A node of the decoded XML tree.
///
/// Elements that carry nothing but character data collapse into `Text`
/// leaves; everything else stays an [`XmlElement`] with its attributes and
/// child sequences intact.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Leaf character data of an element with no attributes or children.
    Text(String),
    /// Element with attributes, named child sequences, and its own text.
    Element(XmlElement),
}

/// An XML element: attribute sub-mapping plus named child sequences.
///
/// Child sequences keep document order within a name, and names keep
/// first-seen order, so "the first child that is not an attribute" is a
/// deterministic question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    attributes: HashMap<String, String>,
    children: Vec<(String, Vec<XmlNode>)>,
    text: String,
}

impl XmlElement {
    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The attribute sub-mapping.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// The ordered sequence of child nodes stored under `name`.
    pub fn child_seq(&self, name: &str) -> Option<&[XmlNode]> {
        self.children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .map(|(_, seq)| seq.as_slice())
    }

    /// The first child name seen in document order and its first node.
    ///
    /// This is the dynamic-typing hook used for custom properties: the one
    /// child that is not the attribute sub-mapping names the runtime value
    /// type.
    pub fn first_child(&self) -> Option<(&str, &XmlNode)> {
        self.children
            .first()
            .and_then(|(name, seq)| seq.first().map(|node| (name.as_str(), node)))
    }

    /// Character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn push_child(&mut self, name: String, node: XmlNode) {
        match self.children.iter_mut().find(|(n, _)| *n == name) {
            Some((_, seq)) => seq.push(node),
            None => self.children.push((name, vec![node])),
        }
    }

    /// Collapse into a node: attribute-free, child-free elements become
    /// plain text leaves, mirroring how leaf elements read in the source
    /// document.
    fn into_node(self) -> XmlNode {
        if self.attributes.is_empty() && self.children.is_empty() {
            XmlNode::Text(self.text)
        } else {
            XmlNode::Element(self)
        }
    }
}

impl XmlNode {
    /// Decode a full XML part into a tree.
    ///
    /// The returned node is a synthetic document element whose single child
    /// sequence holds the root element, so path lookups uniformly start
    /// with the root element's name.
    ///
    /// # Errors
    ///
    /// Returns [`DocPropsError::Xml`] for malformed XML or non-UTF-8
    /// content.
    pub fn decode(content: &[u8]) -> Result<XmlNode> {
        let xml = std::str::from_utf8(content)
            .map_err(|e| DocPropsError::Xml(format!("Invalid UTF-8 in part content: {}", e)))?;

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Bottom of the stack is the synthetic document element.
        let mut stack: Vec<(String, XmlElement)> = vec![(String::new(), XmlElement::default())];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let element = element_with_attributes(e)?;
                    stack.push((qualified_name(e.name().as_ref())?, element));
                },
                Ok(Event::Empty(ref e)) => {
                    let element = element_with_attributes(e)?;
                    let name = qualified_name(e.name().as_ref())?;
                    if let Some((_, parent)) = stack.last_mut() {
                        parent.push_child(name, element.into_node());
                    }
                },
                Ok(Event::Text(ref e)) => {
                    let text = std::str::from_utf8(e.as_ref()).map_err(|e| {
                        DocPropsError::Xml(format!("Invalid UTF-8 in text content: {}", e))
                    })?;
                    if let Some((_, top)) = stack.last_mut() {
                        top.text.push_str(text);
                    }
                },
                Ok(Event::CData(ref e)) => {
                    let text = std::str::from_utf8(e.as_ref()).map_err(|e| {
                        DocPropsError::Xml(format!("Invalid UTF-8 in CDATA content: {}", e))
                    })?;
                    if let Some((_, top)) = stack.last_mut() {
                        top.text.push_str(text);
                    }
                },
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(DocPropsError::Xml(
                            "Unexpected closing tag outside the root element".to_string(),
                        ));
                    }
                    if let Some((name, element)) = stack.pop()
                        && let Some((_, parent)) = stack.last_mut()
                    {
                        parent.push_child(name, element.into_node());
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocPropsError::Xml(format!("XML parsing error: {}", e))),
                _ => {
                    // Declarations, comments and processing instructions
                    // carry no tree content.
                },
            }
        }

        match stack.pop() {
            Some((_, document)) if stack.is_empty() => Ok(XmlNode::Element(document)),
            _ => Err(DocPropsError::Xml(
                "Unexpected end of document inside an open element".to_string(),
            )),
        }
    }

    /// Look up a node by a dot-separated path.
    ///
    /// A name segment selects the first node of that child sequence; a
    /// numeric segment re-selects within the sequence named by the segment
    /// before it. A missing path yields `None`, never an error.
    pub fn lookup(&self, path: &str) -> Option<&XmlNode> {
        let mut current = self;
        let mut sequence: Option<&[XmlNode]> = None;

        for segment in path.split('.') {
            if let Ok(index) = segment.parse::<usize>() {
                current = sequence?.get(index)?;
                sequence = None;
            } else {
                let seq = current.as_element()?.child_seq(segment)?;
                current = seq.first()?;
                sequence = Some(seq);
            }
        }

        Some(current)
    }

    /// The character data of this node: leaf text, or the element's own
    /// text for elements that also carry attributes.
    pub fn text(&self) -> &str {
        match self {
            XmlNode::Text(text) => text,
            XmlNode::Element(element) => element.text(),
        }
    }

    /// Borrow this node as an element, if it is one.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

/// Build an element frame capturing the attribute sub-mapping.
fn element_with_attributes(start: &quick_xml::events::BytesStart<'_>) -> Result<XmlElement> {
    let mut element = XmlElement::default();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocPropsError::Xml(format!("Failed to parse attribute: {}", e)))?;
        let key = qualified_name(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| DocPropsError::Xml(format!("Invalid UTF-8 in attribute value: {}", e)))?;
        element.attributes.insert(key, value.to_string());
    }

    Ok(element)
}

/// Element and attribute names keep their prefixes as written; the fixed
/// schema paths address prefixed names directly.
fn qualified_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| DocPropsError::Xml(format!("Invalid UTF-8 in element name: {}", e)))
}
