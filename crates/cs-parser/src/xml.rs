use cs_core::CutStackError;
use roxmltree::{Document, Node, NodeType};

use crate::tree::{XmlAttribute, XmlDocument, XmlElementNode, XmlNode, XmlTextNode};

pub fn parse_xml_document(source: &str) -> Result<XmlDocument, CutStackError> {
    let document = Document::parse(source)
        .map_err(|error| CutStackError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(CutStackError::new(
            "XML_PARSE_ERROR",
            "XML document must contain a root element.",
        ));
    };

    Ok(XmlDocument {
        root: parse_element(root),
    })
}

fn parse_element(node: Node<'_, '_>) -> XmlElementNode {
    let attributes = node
        .attributes()
        .map(|attribute| XmlAttribute {
            name: attribute.name().to_string(),
            value: attribute.value().to_string(),
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(XmlNode::Element(parse_element(child))),
            NodeType::Text => {
                let value = child.text().unwrap_or_default().to_string();
                if value.is_empty() {
                    continue;
                }
                children.push(XmlNode::Text(XmlTextNode { value }));
            }
            _ => {}
        }
    }

    XmlElementNode {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
    }
}
