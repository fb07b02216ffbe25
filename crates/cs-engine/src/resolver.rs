use cs_parser::{XmlDocument, XmlElementNode};

pub(crate) const CUT_SETTING_TAG: &str = "CutSetting";
const NAME_TAG: &str = "name";
pub(crate) const VALUE_ATTR: &str = "Value";

pub fn flyer_token(prefix: &str, index: i64) -> String {
    format!("{}{}", prefix, index)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized name of a `CutSetting`: its `name` child's `Value`, or the
/// child's text when `Value` is missing or empty.
pub fn declared_name(cut: &XmlElementNode) -> Option<String> {
    let name = cut.child(NAME_TAG)?;
    let raw = match name.attr(VALUE_ATTR) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => name.text(),
    };
    Some(normalize(&raw))
}

fn is_named_cut(node: &XmlElementNode, key: &str) -> bool {
    node.name == CUT_SETTING_TAG && declared_name(node).as_deref() == Some(key)
}

pub fn find_cut_setting<'a>(document: &'a XmlDocument, name: &str) -> Option<&'a XmlElementNode> {
    let key = normalize(name);
    document
        .root
        .descendants()
        .find(|node| is_named_cut(node, &key))
}

pub fn find_cut_setting_mut<'a>(
    document: &'a mut XmlDocument,
    name: &str,
) -> Option<&'a mut XmlElementNode> {
    let key = normalize(name);
    document
        .root
        .find_descendant_mut(|node| is_named_cut(node, &key))
}

/// Names declared by more than one `CutSetting`, in first-seen order.
pub fn duplicate_cut_setting_names(document: &XmlDocument) -> Vec<String> {
    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for name in document
        .root
        .descendants()
        .filter(|node| node.name == CUT_SETTING_TAG)
        .filter_map(declared_name)
    {
        if seen.contains(&name) {
            if !duplicates.contains(&name) {
                duplicates.push(name);
            }
        } else {
            seen.push(name);
        }
    }
    duplicates
}
