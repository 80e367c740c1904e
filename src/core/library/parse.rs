//! core/library/parse.rs
//! Builds the database tree straight from xml-rs events.
//!
//! Whitespace is reported as ordinary text, so a field holding only spaces
//! (`<title> </title>`) keeps them. Layout whitespace between elements is
//! thrown away later by `format::reformat`.

use std::io::Read;

use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, ParseError, XMLNode};

use super::super::error::Result;

pub(super) fn parse_document<R: Read>(reader: R) -> Result<Element> {
    let config = ParserConfig::new().whitespace_to_characters(true);
    let mut events = EventReader::new_with_config(reader, config);

    let mut open: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match events.next().map_err(ParseError::MalformedXml)? {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let mut element = Element::new(&name.local_name);
                element.prefix = name.prefix;
                element.namespace = name.namespace;
                if !namespace.is_essentially_empty() {
                    element.namespaces = Some(namespace);
                }
                for attr in attributes {
                    element.attributes.insert(attr.name.local_name, attr.value);
                }
                open.push(element);
            }
            XmlEvent::EndElement { .. } => {
                let done = open.pop().ok_or(ParseError::CannotParse)?;
                match open.last_mut() {
                    Some(parent) => parent.children.push(XMLNode::Element(done)),
                    None => root = Some(done),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                // Text outside the root element is only layout.
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::Text(text));
                }
            }
            XmlEvent::Comment(text) => {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::Comment(text));
                }
            }
            XmlEvent::EndDocument => {
                return root.ok_or_else(|| ParseError::CannotParse.into());
            }
            _ => {}
        }
    }
}
