use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use cs_core::CutStackError;
use cs_engine::{
    count_sequential_flyers, duplicate_cut_setting_names, flyer_token, run_patch, PatchReport,
    RunOutcome,
};

mod cli_args;
mod config;
mod dataset_loader;
mod error_map;
mod logging;
mod template_io;

pub(crate) use cli_args::{Cli, InspectArgs, Mode, RunArgs};
pub(crate) use config::{load_igsn, load_run_config};
pub(crate) use dataset_loader::load_dataset;
pub(crate) use error_map::{
    emit_error, map_config_parse, map_config_read, map_dataset_read, map_igsn_parse,
    map_igsn_read, map_output_write, map_template_read,
};
pub(crate) use template_io::{load_template, save_document};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    logging::init_logging();
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CutStackError> {
    match cli.command {
        Mode::Run(args) => run_stack(args),
        Mode::Inspect(args) => run_inspect(args),
    }
}

fn run_stack(args: RunArgs) -> Result<i32, CutStackError> {
    let loaded = load_run_config(Path::new(&args.config))?;
    tracing::info!(
        id = %loaded.config.id,
        operator = %loaded.config.operator,
        template = %loaded.template_path.display(),
        "run config loaded"
    );

    let igsn = match &loaded.igsn_path {
        Some(path) => load_igsn(path)?,
        None => None,
    };
    let dataset = load_dataset(Path::new(&args.dataset))?;
    tracing::info!(rows = dataset.len(), "dataset loaded");

    let mut document = load_template(&loaded.template_path)?;
    let outcome = run_patch(
        &mut document,
        &dataset,
        &loaded.patch_plan(),
        &loaded.naming_spec(),
        &loaded.naming_context(igsn),
    )?;
    log_report(&outcome.report);

    if args.dry_run {
        tracing::info!(path = %outcome.output_path.display(), "dry run; output not written");
    } else {
        save_document(&outcome.output_path, &document)?;
        tracing::info!(path = %outcome.output_path.display(), "updated project saved");
    }

    emit_outcome(&outcome, args.dry_run);
    Ok(0)
}

fn run_inspect(args: InspectArgs) -> Result<i32, CutStackError> {
    let document = load_template(Path::new(&args.template))?;
    let count = count_sequential_flyers(&document, &args.prefix, args.start);
    if count == 0 {
        tracing::warn!(
            first = %flyer_token(&args.prefix, args.start),
            "no sequential flyers found"
        );
    }
    for name in duplicate_cut_setting_names(&document) {
        tracing::warn!(name = %name, "cut setting name declared more than once");
    }

    println!("RESULT:OK");
    println!("FLYERS:{}", count);
    Ok(0)
}

fn log_report(report: &PatchReport) {
    for index in &report.missing {
        tracing::warn!(flyer = *index, "flyer in selection range is not in the template");
    }
    for skipped in &report.skipped {
        tracing::warn!(
            flyer = %skipped.token,
            row = skipped.row_index,
            "skipped: {}",
            skipped.reason.describe()
        );
    }
    for created in &report.created_fields {
        tracing::info!(
            flyer = %created.token,
            field = created.field,
            value = %created.value,
            "created missing field"
        );
    }
    for warning in &report.warnings {
        tracing::warn!(code = warning.code, "{}", warning.message);
    }
    tracing::info!(
        selected = report.selected_count(),
        applied = report.applied,
        replaced = report.placeholder_replacements,
        "template patched"
    );
}

fn emit_outcome(outcome: &RunOutcome, dry_run: bool) {
    println!("RESULT:OK");
    println!("OUTPUT:{}", outcome.output_path.display());
    println!("WRITTEN:{}", !dry_run);
    println!("SELECTED:{}", outcome.report.selected_count());
    println!("APPLIED:{}", outcome.report.applied);
    println!("REPLACED:{}", outcome.report.placeholder_replacements);
}


#[cfg(test)]
mod tests;
