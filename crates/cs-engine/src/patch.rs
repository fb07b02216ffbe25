use cs_core::{CutField, Dataset, Scalar};
use cs_parser::XmlDocument;

use crate::resolver::{find_cut_setting_mut, VALUE_ATTR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPatch {
    /// Row written; `created` lists fields that were absent and got appended.
    Applied { created: Vec<CutField> },
    FlyerMissing,
    RowOutOfRange,
}

impl RowPatch {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// String written to a field's `Value`. Integer fields are truncated when
/// they read as numbers and otherwise keep their raw form.
pub fn field_value_string(field: CutField, value: &Scalar) -> String {
    if field.is_integer() {
        if let Some(integer) = value.to_integer_string() {
            return integer;
        }
    }
    value.to_string()
}

pub fn apply_row(
    document: &mut XmlDocument,
    flyer_token: &str,
    dataset: &Dataset,
    row_index: usize,
) -> RowPatch {
    let Some(cut) = find_cut_setting_mut(document, flyer_token) else {
        return RowPatch::FlyerMissing;
    };
    let Some(row) = dataset.row(row_index) else {
        return RowPatch::RowOutOfRange;
    };

    let mut created = Vec::new();
    for field in CutField::ALL {
        let value = field_value_string(field, row.get(field));
        if cut.upsert_child_attr(field.name(), VALUE_ATTR, &value) {
            created.push(field);
        }
    }
    RowPatch::Applied { created }
}

#[cfg(test)]
mod patch_tests {
    use super::*;
    use cs_core::DataRow;
    use cs_parser::{parse_xml_document, XmlElementNode};

    use crate::resolver::find_cut_setting;

    const TEMPLATE: &str = r#"<LightBurnProject>
  <CutSetting type="Scan">
    <index Value="0"/>
    <name Value="F1"/>
    <maxPower Value="10"/>
    <speed Value="100"/>
    <numPasses Value="1"/>
  </CutSetting>
  <CutSetting type="Scan">
    <index Value="1"/>
    <name Value="F2"/>
    <maxPower Value="20"/>
  </CutSetting>
</LightBurnProject>"#;

    fn row(values: [Scalar; 5]) -> DataRow {
        DataRow::from_cells(values)
    }

    fn field_value<'a>(cut: &'a XmlElementNode, name: &str) -> Option<&'a str> {
        cut.child(name).and_then(|child| child.attr(VALUE_ATTR))
    }

    fn numeric_row(power: f64, pulse: f64, speed: f64, freq: f64, passes: f64) -> DataRow {
        row([
            Scalar::Number(power),
            Scalar::Number(pulse),
            Scalar::Number(speed),
            Scalar::Number(freq),
            Scalar::Number(passes),
        ])
    }

    #[test]
    fn apply_row_overwrites_existing_and_creates_missing_fields() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let dataset = Dataset::new(vec![numeric_row(55.5, 200.0, 1500.0, 30000.9, 2.0)]);

        let outcome = apply_row(&mut document, "F1", &dataset, 0);
        assert_eq!(
            outcome,
            RowPatch::Applied {
                created: vec![CutField::QPulseWidth, CutField::Frequency]
            }
        );

        let cut = find_cut_setting(&document, "F1").expect("F1");
        assert_eq!(field_value(cut, "maxPower"), Some("55.5"));
        assert_eq!(field_value(cut, "QPulseWidth"), Some("200"));
        assert_eq!(field_value(cut, "speed"), Some("1500"));
        assert_eq!(field_value(cut, "frequency"), Some("30000"));
        assert_eq!(field_value(cut, "numPasses"), Some("2"));
        assert_eq!(field_value(cut, "index"), Some("0"));

        let untouched = find_cut_setting(&document, "F2").expect("F2");
        assert_eq!(field_value(untouched, "maxPower"), Some("20"));
        assert_eq!(untouched.element_children().count(), 3);
    }

    #[test]
    fn apply_row_keeps_raw_value_when_integer_coercion_fails() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let dataset = Dataset::new(vec![row([
            Scalar::Number(40.0),
            Scalar::Text("n/a".to_string()),
            Scalar::Number(900.0),
            Scalar::Text("high".to_string()),
            Scalar::Text("3.7".to_string()),
        ])]);

        assert!(apply_row(&mut document, "f1", &dataset, 0).is_applied());
        let cut = find_cut_setting(&document, "F1").expect("F1");
        assert_eq!(field_value(cut, "frequency"), Some("high"));
        assert_eq!(field_value(cut, "numPasses"), Some("3"));
        assert_eq!(field_value(cut, "QPulseWidth"), Some("n/a"));
    }

    #[test]
    fn apply_row_reports_missing_flyer_and_out_of_range_row() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let before = document.clone();
        let dataset = Dataset::new(vec![numeric_row(1.0, 1.0, 1.0, 1.0, 1.0)]);

        assert_eq!(apply_row(&mut document, "F9", &dataset, 0), RowPatch::FlyerMissing);
        assert_eq!(apply_row(&mut document, "F1", &dataset, 1), RowPatch::RowOutOfRange);
        assert_eq!(document, before);
    }

    #[test]
    fn second_application_leaves_only_latest_values() {
        let mut document = parse_xml_document(TEMPLATE).expect("template");
        let dataset = Dataset::new(vec![
            numeric_row(10.0, 100.0, 1000.0, 20000.0, 1.0),
            numeric_row(90.0, 350.0, 3000.0, 60000.0, 4.0),
        ]);

        apply_row(&mut document, "F2", &dataset, 0);
        let second = apply_row(&mut document, "F2", &dataset, 1);
        assert_eq!(second, RowPatch::Applied { created: Vec::new() });

        let cut = find_cut_setting(&document, "F2").expect("F2");
        let fields: Vec<(&str, &str)> = cut
            .element_children()
            .filter(|child| child.name != "index" && child.name != "name")
            .map(|child| (child.name.as_str(), child.attr(VALUE_ATTR).unwrap_or_default()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("maxPower", "90"),
                ("QPulseWidth", "350"),
                ("speed", "3000"),
                ("frequency", "60000"),
                ("numPasses", "4"),
            ]
        );
    }

    #[test]
    fn field_value_string_only_coerces_integer_fields() {
        assert_eq!(field_value_string(CutField::Speed, &Scalar::Number(12.75)), "12.75");
        assert_eq!(field_value_string(CutField::NumPasses, &Scalar::Number(12.75)), "12");
        assert_eq!(field_value_string(CutField::Frequency, &Scalar::Empty), "");
    }
}
