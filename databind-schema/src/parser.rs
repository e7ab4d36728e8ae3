//! XML binding document reader.
//!
//! Turns a markup document into the generic [`SchemaNode`] tree. This is the
//! only place that knows about XML; the builder works on the tree alone.

use crate::error::ParseError;
use crate::node::SchemaNode;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parses an XML binding document into a node tree.
///
/// # Arguments
/// * `xml` - XML document content
///
/// # Returns
/// The root element with its attributes and element children. Text content,
/// comments and processing instructions are dropped.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or has no root element.
pub fn parse_xml(xml: &str) -> Result<SchemaNode, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<SchemaNode> = Vec::new();
    let mut root: Option<SchemaNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(read_element(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let node = read_element(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::invalid_structure("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::invalid_structure(format!(
            "element '{}' is never closed",
            open.tag
        )));
    }

    root.ok_or_else(|| ParseError::invalid_structure("no root element found"))
}

/// Parses an XML binding document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or is not valid XML.
pub fn parse_xml_file(path: &std::path::Path) -> Result<SchemaNode, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_xml(&xml)
}

/// Reads the tag and attributes of an element.
fn read_element(e: &BytesStart<'_>) -> Result<SchemaNode, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let mut node = SchemaNode::new(std::str::from_utf8(&name_bytes)?);

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        node.set_attr(key, unescape(raw)?.into_owned());
    }

    Ok(node)
}

/// Attaches a finished node to its parent, or makes it the root.
fn attach(
    stack: &mut [SchemaNode],
    root: &mut Option<SchemaNode>,
    node: SchemaNode,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(ParseError::invalid_structure(format!(
            "unexpected second root element '{}'",
            node.tag
        ))),
    }
}
