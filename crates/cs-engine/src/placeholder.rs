use cs_core::PlaceholderRule;
use cs_parser::XmlDocument;

const SHAPE_TAG: &str = "Shape";
const TYPE_ATTR: &str = "Type";
const TEXT_TYPE: &str = "Text";
const STR_ATTR: &str = "Str";

/// Replaces the `Str` of every text shape whose whole value equals
/// `rule.old_text`. Returns the number of shapes changed.
pub fn substitute_placeholder(document: &mut XmlDocument, rule: &PlaceholderRule) -> usize {
    let folded_old = rule.old_text.to_lowercase();
    let mut replaced = 0usize;

    document.root.for_each_descendant_mut(|node| {
        if node.name != SHAPE_TAG || node.attr(TYPE_ATTR) != Some(TEXT_TYPE) {
            return;
        }
        let current = node.attr(STR_ATTR).unwrap_or_default();
        let matches = if rule.case_insensitive {
            current.to_lowercase() == folded_old
        } else {
            current == rule.old_text
        };
        if matches {
            node.set_attr(STR_ATTR, &rule.new_text);
            replaced += 1;
        }
    });

    replaced
}

#[cfg(test)]
mod placeholder_tests {
    use super::*;
    use cs_parser::parse_xml_document;

    const TEMPLATE: &str = r#"<LightBurnProject>
  <Shape Type="Text" Str="FLYID"/>
  <Shape Type="Group">
    <Children>
      <Shape Type="Text" Str="flyid"/>
      <Shape Type="Text" Str="FLYID-2"/>
    </Children>
  </Shape>
  <Shape Type="Rect" Str="FLYID"/>
  <Text Str="FLYID"/>
</LightBurnProject>"#;

    fn text_strs(document: &XmlDocument) -> Vec<String> {
        document
            .root
            .descendants()
            .filter(|node| node.name == SHAPE_TAG)
            .filter_map(|node| node.attr(STR_ATTR).map(str::to_string))
            .collect()
    }

    #[test]
    fn substitute_replaces_whole_value_matches_case_insensitively() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let replaced = substitute_placeholder(&mut document, &PlaceholderRule::new("FlyID", "0042"));
        assert_eq!(replaced, 2);
        assert_eq!(text_strs(&document), vec!["0042", "0042", "FLYID-2", "FLYID"]);
    }

    #[test]
    fn substitute_respects_case_sensitive_rule() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let rule = PlaceholderRule {
            case_insensitive: false,
            ..PlaceholderRule::new("FLYID", "0042")
        };
        assert_eq!(substitute_placeholder(&mut document, &rule), 1);
        assert_eq!(text_strs(&document)[1], "flyid");
    }

    #[test]
    fn second_substitution_is_a_no_op() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let rule = PlaceholderRule::new("FLYID", "0042");
        assert_eq!(substitute_placeholder(&mut document, &rule), 2);
        let after_first = document.clone();
        assert_eq!(substitute_placeholder(&mut document, &rule), 0);
        assert_eq!(document, after_first);
    }

    #[test]
    fn text_shape_without_str_matches_only_empty_placeholder() {
        let mut document =
            parse_xml_document(r#"<root><Shape Type="Text"/></root>"#).expect("template");
        assert_eq!(
            substitute_placeholder(&mut document, &PlaceholderRule::new("FLYID", "1")),
            0
        );
        assert_eq!(
            substitute_placeholder(&mut document, &PlaceholderRule::new("", "1")),
            1
        );
    }
}
