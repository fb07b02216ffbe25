use cs_core::CutStackError;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::tree::{XmlDocument, XmlElementNode, XmlNode};

/// Serializes the tree with a UTF-8 XML declaration. Whitespace text nodes
/// captured at parse time are written back, so layout survives a round trip.
pub fn write_xml_document(document: &XmlDocument) -> Result<String, CutStackError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(map_xml_write)?;
    writer.get_mut().push(b'\n');
    write_element(&mut writer, &document.root)?;
    writer.get_mut().push(b'\n');

    String::from_utf8(writer.into_inner()).map_err(map_xml_write)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElementNode,
) -> Result<(), CutStackError> {
    let mut start = BytesStart::new(element.name.as_str());
    for attribute in &element.attributes {
        let value = escape_attribute(&attribute.value);
        start.push_attribute((attribute.name.as_bytes(), value.as_bytes()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(map_xml_write);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(map_xml_write)?;
    for child in &element.children {
        match child {
            XmlNode::Element(node) => write_element(writer, node)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::from_escaped(escape_text(&text.value))))
                .map_err(map_xml_write)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(map_xml_write)
}

/// Attribute values are normalized on read, so whitespace control
/// characters must be written as character references to survive.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Line-end handling folds a raw `\r` in text into `\n`.
fn escape_text(value: &str) -> String {
    escape(value).replace('\r', "&#13;")
}

fn map_xml_write(error: impl std::fmt::Display) -> CutStackError {
    CutStackError::new("XML_WRITE_ERROR", error.to_string())
}
