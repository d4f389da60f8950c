//! Owned, ordered XML element tree.

use std::fmt;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::XmlError;

/// One element of a parsed document.
///
/// Children keep document order; same-named siblings are distinct entries.
/// Text is the concatenation of the element's direct text nodes, so mixed
/// content loses its interleaving with child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    pub(crate) children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder helper adding an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder helper setting the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder helper appending a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Qualified name as written in the document, including any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// Raw text content, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Look up an attribute by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in document order as `(qualified name, value)`.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Set an attribute, replacing an existing one with the same qualified name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// Serialise this element and its subtree.
    pub fn to_xml(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        String::from_utf8(writer.into_inner())
            .map_err(|err| XmlError::Write(format!("invalid UTF-8: {err}")))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml() {
            Ok(xml) => f.write_str(&xml),
            Err(_) => write!(f, "<{}/>", self.name),
        }
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() && element.text.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|err| XmlError::Write(err.to_string()));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(|err| XmlError::Write(err.to_string()))?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(|err| XmlError::Write(err.to_string()))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|err| XmlError::Write(err.to_string()))
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_match_by_local_name() {
        let element = Element::new("link")
            .with_attribute("rel", "SELF")
            .with_attribute("xlink:href", "https://hmc/rest/api/uom/ManagedSystem/1");
        assert_eq!(element.attribute("rel"), Some("SELF"));
        assert_eq!(
            element.attribute("href"),
            Some("https://hmc/rest/api/uom/ManagedSystem/1")
        );
        assert_eq!(element.attribute("type"), None);
    }

    #[test]
    fn set_attribute_replaces_existing() {
        let mut element = Element::new("content").with_attribute("type", "a");
        element.set_attribute("type", "b");
        assert_eq!(element.attributes().count(), 1);
        assert_eq!(element.attribute("type"), Some("b"));
    }

    #[test]
    fn serialise_escapes_text_and_attributes() {
        let element = Element::new("PartitionName")
            .with_attribute("kb", "CUR\"")
            .with_text("lpar <1> & co");
        let xml = element.to_xml().expect("serialise");
        assert_eq!(
            xml,
            "<PartitionName kb=\"CUR&quot;\">lpar &lt;1&gt; &amp; co</PartitionName>"
        );
        let back = crate::parse(&xml).expect("reparse");
        assert_eq!(back, element);
    }

    #[test]
    fn empty_elements_serialise_self_closing() {
        let element = Element::new("Partitions").with_child(Element::new("link"));
        assert_eq!(element.to_string(), "<Partitions><link/></Partitions>");
    }
}
