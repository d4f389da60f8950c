//! Parse HMC REST response documents into an owned element tree using quick-xml.

pub mod element;
pub mod path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::trace;

pub use element::Element;
pub use path::{attribute, find, find_all, text, Path, Segment};

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml: {0}")]
    Xml(String),
    #[error("invalid path expression: {0}")]
    Path(String),
    #[error("write: {0}")]
    Write(String),
}

/// Parse a complete XML document and return its root element.
///
/// Whitespace-only text between elements is dropped. Comments, processing
/// instructions and the XML declaration are skipped.
pub fn parse(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(open_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Xml("unexpected closing tag".into()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(t)) => {
                let value = t.unescape().map_err(|err| XmlError::Xml(err.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.push_text(&value);
                }
            }
            Ok(Event::CData(c)) => {
                let value = String::from_utf8_lossy(&c.into_inner()).to_string();
                if let Some(top) = stack.last_mut() {
                    top.push_text(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(XmlError::Xml(err.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Xml(format!("unclosed element <{}>", open.name())));
    }
    let root = root.ok_or_else(|| XmlError::Xml("document has no root element".into()))?;
    trace!(root = %root.name(), "parsed document");
    Ok(root)
}

fn open_element(event: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(event.name().as_ref()).to_string();
    let mut element = Element::new(name);
    for attr in event.attributes() {
        let attr = attr.map_err(|err| XmlError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Xml(err.to_string()))?;
        element.set_attribute(key, value.to_string());
    }
    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Xml(format!(
            "second root element <{}>",
            element.name()
        )));
    }
    *root = Some(element);
    Ok(())
}
