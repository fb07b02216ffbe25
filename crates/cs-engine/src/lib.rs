mod assignment;
mod output_path;
mod patch;
mod placeholder;
mod report;
mod resolver;
mod run;
mod selection;

pub use assignment::{map_position, AssignmentPlan};
pub use output_path::{
    output_directory, output_file_parts, resolve_output_path, resolve_output_path_at,
    sanitize_token, validate_naming, TIMESTAMP_FORMAT,
};
pub use patch::{apply_row, field_value_string, RowPatch};
pub use placeholder::substitute_placeholder;
pub use report::{CreatedField, Diagnostic, PatchReport, SkipReason, SkippedFlyer};
pub use resolver::{
    declared_name, duplicate_cut_setting_names, find_cut_setting, find_cut_setting_mut,
    flyer_token,
};
pub use run::{patch_template, run_patch, PatchPlan, RunOutcome};
pub use selection::{count_sequential_flyers, resolve_range, select_flyers, FlyerRange, FlyerSelection};
