mod tree;
mod writer;
mod xml;

pub use tree::{XmlAttribute, XmlDocument, XmlElementNode, XmlNode, XmlTextNode};
pub use writer::write_xml_document;
pub use xml::parse_xml_document;
