//! XML document to [`Node`] tree conversion.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use hvf_model::{Mapping, Node};

use crate::error::{IngestError, Result};

/// An element whose end tag has not been read yet.
struct OpenElement {
    name: String,
    /// Attributes (`@name`) first, then child elements in document order.
    children: Mapping,
    text: String,
}

impl OpenElement {
    fn into_parts(self) -> (String, Node) {
        let text = self.text.trim();
        if self.children.is_empty() {
            return (self.name, Node::scalar(text));
        }
        let mut children = self.children;
        if !text.is_empty() {
            children.insert("#text", Node::scalar(text));
        }
        (self.name, Node::Mapping(children))
    }
}

/// Parse an export document held in memory.
///
/// The result is a mapping with a single entry: the root element.
pub fn parse_export_str(text: &str) -> Result<Node> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    // End tags are matched below to report both names.
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|error| IngestError::xml(reader.error_position(), error))?;
        match event {
            Event::Start(start) => stack.push(open_element(&reader, &start, position)?),
            Event::Empty(start) => {
                let element = open_element(&reader, &start, position)?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::End(end) => {
                let found = decode(&reader, end.name().as_ref(), position)?;
                let Some(element) = stack.pop() else {
                    return Err(IngestError::UnmatchedEnd { found, position });
                };
                if element.name != found {
                    return Err(IngestError::MismatchedEnd {
                        expected: element.name,
                        found,
                        position,
                    });
                }
                close_element(&mut stack, &mut root, element, position)?;
            }
            Event::Text(content) => {
                let content = decode(&reader, &content, position)?;
                push_text(&mut stack, &content, position)?;
            }
            Event::CData(content) => {
                let content = decode(&reader, &content, position)?;
                push_text(&mut stack, &content, position)?;
            }
            Event::GeneralRef(reference) => {
                let name = decode(&reader, &reference, position)?;
                let resolved = resolve_reference(&name).ok_or_else(|| {
                    IngestError::xml(position, format!("unknown entity reference &{name};"))
                })?;
                push_text(&mut stack, &resolved, position)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(IngestError::UnexpectedEnd { element: open.name });
    }
    let (name, node) = root.ok_or(IngestError::NoRootElement)?;
    Ok(Node::Mapping(Mapping::new().with(name, node)))
}

fn decode(reader: &Reader<&[u8]>, bytes: &[u8], position: u64) -> Result<String> {
    reader
        .decoder()
        .decode(bytes)
        .map(Cow::into_owned)
        .map_err(|error| IngestError::xml(position, error))
}

fn open_element(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<OpenElement> {
    let name = decode(reader, start.name().as_ref(), position)?;
    let mut children = Mapping::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| IngestError::xml(position, error))?;
        let key = decode(reader, attribute.key.as_ref(), position)?;
        let value = attribute
            .unescape_value()
            .map_err(|error| IngestError::xml(position, error))?;
        children.insert(format!("@{key}"), Node::scalar(value.into_owned()));
    }
    Ok(OpenElement {
        name,
        children,
        text: String::new(),
    })
}

fn close_element(
    stack: &mut [OpenElement],
    root: &mut Option<(String, Node)>,
    element: OpenElement,
    position: u64,
) -> Result<()> {
    let (name, node) = element.into_parts();
    match stack.last_mut() {
        Some(parent) => parent.children.append(name, node),
        None if root.is_some() => {
            return Err(IngestError::xml(
                position,
                format!("second root element <{name}>"),
            ));
        }
        None => *root = Some((name, node)),
    }
    Ok(())
}

fn push_text(stack: &mut [OpenElement], content: &str, position: u64) -> Result<()> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(content),
        None if content.trim().is_empty() => {}
        None => {
            return Err(IngestError::xml(position, "text outside the root element"));
        }
    }
    Ok(())
}

/// Resolves `&name;` content: predefined entities and numeric character references.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}
