#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElementNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElementNode),
    Text(XmlTextNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementNode {
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlTextNode {
    pub value: String,
}

impl XmlElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlElementNode) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, value: &str) -> Self {
        self.children.push(XmlNode::Text(XmlTextNode {
            value: value.to_string(),
        }));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Overwrites the attribute in place, or appends it after the existing ones.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|attribute| attribute.name == name)
        {
            Some(attribute) => attribute.value = value.to_string(),
            None => self.attributes.push(XmlAttribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn element_children(&self) -> impl Iterator<Item = &XmlElementNode> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&XmlElementNode> {
        self.element_children().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElementNode> {
        self.children.iter_mut().find_map(|child| match child {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(XmlTextNode { value }) => Some(value.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Sets `attr` on the first direct child called `child_name`, creating
    /// the child when absent. Returns `true` when a child was created.
    pub fn upsert_child_attr(&mut self, child_name: &str, attr: &str, value: &str) -> bool {
        if let Some(child) = self.child_mut(child_name) {
            child.set_attr(attr, value);
            return false;
        }
        self.children
            .push(XmlNode::Element(XmlElementNode::new(child_name).with_attr(attr, value)));
        true
    }

    /// Pre-order walk over all descendant elements, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&XmlElementNode> = self.element_children().collect();
        stack.reverse();
        Descendants { stack }
    }

    pub fn find_descendant_mut<F>(&mut self, predicate: F) -> Option<&mut XmlElementNode>
    where
        F: Fn(&XmlElementNode) -> bool,
    {
        find_descendant_mut(self, &predicate)
    }

    pub fn for_each_descendant_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut XmlElementNode),
    {
        for_each_descendant_mut(self, &mut visit);
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a XmlElementNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(node.element_children());
        self.stack[start..].reverse();
        Some(node)
    }
}

fn find_descendant_mut<'a>(
    node: &'a mut XmlElementNode,
    predicate: &dyn Fn(&XmlElementNode) -> bool,
) -> Option<&'a mut XmlElementNode> {
    for child in node.children.iter_mut() {
        let XmlNode::Element(element) = child else {
            continue;
        };
        if predicate(element) {
            return Some(element);
        }
        if let Some(found) = find_descendant_mut(element, predicate) {
            return Some(found);
        }
    }
    None
}

fn for_each_descendant_mut(node: &mut XmlElementNode, visit: &mut dyn FnMut(&mut XmlElementNode)) {
    for child in node.children.iter_mut() {
        if let XmlNode::Element(element) = child {
            visit(element);
            for_each_descendant_mut(element, visit);
        }
    }
}
