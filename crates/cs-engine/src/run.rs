use std::path::PathBuf;

use cs_core::{
    AssignmentSpec, CutStackError, Dataset, NamingContext, OutputNamingSpec, PlaceholderRule,
    SelectionSpec, DEFAULT_FLYER_PREFIX,
};
use cs_parser::XmlDocument;

use crate::assignment::AssignmentPlan;
use crate::output_path::{resolve_output_path, validate_naming};
use crate::patch::{apply_row, field_value_string, RowPatch};
use crate::placeholder::substitute_placeholder;
use crate::report::{CreatedField, Diagnostic, PatchReport, SkipReason, SkippedFlyer};
use crate::resolver::{duplicate_cut_setting_names, flyer_token};
use crate::selection::select_flyers;

#[derive(Debug, Clone, PartialEq)]
pub struct PatchPlan {
    pub selection: SelectionSpec,
    pub assignment: AssignmentSpec,
    pub placeholder: PlaceholderRule,
    pub flyer_prefix: String,
}

impl PatchPlan {
    pub fn new(
        selection: SelectionSpec,
        assignment: AssignmentSpec,
        placeholder: PlaceholderRule,
    ) -> Self {
        Self {
            selection,
            assignment,
            placeholder,
            flyer_prefix: DEFAULT_FLYER_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub report: PatchReport,
    pub output_path: PathBuf,
}

/// Patches every selected flyer and substitutes the placeholder.
///
/// Selection errors and an empty selection abort before the document is
/// touched. Missing flyers and out-of-range rows are skipped and recorded.
pub fn patch_template(
    document: &mut XmlDocument,
    dataset: &Dataset,
    plan: &PatchPlan,
) -> Result<PatchReport, CutStackError> {
    let selection = select_flyers(document, &plan.selection, &plan.flyer_prefix)?;
    if selection.selected.is_empty() {
        return Err(CutStackError::new(
            "NO_TARGETS",
            format!(
                "No flyers named \"{}<n>\" exist in the selected range.",
                plan.flyer_prefix
            ),
        ));
    }

    let mut report = PatchReport {
        selected: selection.selected,
        missing: selection.missing,
        ..PatchReport::default()
    };

    for name in duplicate_cut_setting_names(document) {
        report.warnings.push(Diagnostic::new(
            "DUPLICATE_FLYER_NAME",
            format!(
                "Cut setting name \"{}\" is declared more than once; the first one is patched.",
                name
            ),
        ));
    }

    let (assignment, assignment_warnings) = AssignmentPlan::from_spec(&plan.assignment);
    report.warnings.extend(assignment_warnings);

    for (position, flyer) in report.selected.iter().enumerate() {
        let token = flyer_token(&plan.flyer_prefix, *flyer);
        let row_index = assignment.row_for(position);
        match apply_row(document, &token, dataset, row_index) {
            RowPatch::Applied { created } => {
                report.applied += 1;
                if let Some(row) = dataset.row(row_index) {
                    report
                        .created_fields
                        .extend(created.into_iter().map(|field| CreatedField {
                            token: token.clone(),
                            field: field.name(),
                            value: field_value_string(field, row.get(field)),
                        }));
                }
            }
            RowPatch::FlyerMissing => report.skipped.push(SkippedFlyer {
                token,
                row_index,
                reason: SkipReason::FlyerMissing,
            }),
            RowPatch::RowOutOfRange => report.skipped.push(SkippedFlyer {
                token,
                row_index,
                reason: SkipReason::RowOutOfRange,
            }),
        }
    }

    report.placeholder_replacements = substitute_placeholder(document, &plan.placeholder);
    if report.placeholder_replacements == 0 {
        report.warnings.push(Diagnostic::new(
            "PLACEHOLDER_NOT_FOUND",
            format!(
                "No text shape reads \"{}\"; nothing was replaced.",
                plan.placeholder.old_text
            ),
        ));
    }

    Ok(report)
}

/// Full pass: patch the document, then pick a collision-free output path.
pub fn run_patch(
    document: &mut XmlDocument,
    dataset: &Dataset,
    plan: &PatchPlan,
    naming: &OutputNamingSpec,
    context: &NamingContext,
) -> Result<RunOutcome, CutStackError> {
    validate_naming(naming)?;
    let report = patch_template(document, dataset, plan)?;
    let output_path = resolve_output_path(naming, context)?;
    Ok(RunOutcome {
        report,
        output_path,
    })
}
