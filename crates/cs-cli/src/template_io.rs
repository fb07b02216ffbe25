use std::fs;
use std::path::Path;

use cs_core::CutStackError;
use cs_parser::{parse_xml_document, write_xml_document, XmlDocument};

use crate::{map_output_write, map_template_read};

pub(crate) fn load_template(path: &Path) -> Result<XmlDocument, CutStackError> {
    let raw = fs::read_to_string(path).map_err(map_template_read)?;
    parse_xml_document(raw.strip_prefix('\u{feff}').unwrap_or(&raw))
}

/// Single non-atomic write of the patched document.
pub(crate) fn save_document(path: &Path, document: &XmlDocument) -> Result<(), CutStackError> {
    let payload = write_xml_document(document)?;
    fs::write(path, payload).map_err(map_output_write)
}
