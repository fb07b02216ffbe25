use std::fs;
use std::path::{Path, PathBuf};

use std::ops::RangeInclusive;

use cs_core::{
    AssignmentSpec, CutStackError, NamingContext, OutputNamingSpec, PlaceholderRule, Scalar,
    SelectionSpec, DEFAULT_FLYER_PREFIX, DEFAULT_OUTPUT_BASE, DEFAULT_OUTPUT_DIR,
    DEFAULT_PLACEHOLDER,
};
use cs_engine::PatchPlan;
use serde::Deserialize;

use crate::{map_config_parse, map_config_read, map_igsn_parse, map_igsn_read};

const FORM_INTEGER_RANGE: RangeInclusive<i64> = 0..=30;

/// On-disk run configuration, keyed the way the operator's config form
/// writes it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RunConfig {
    #[serde(rename = "ID", default)]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) operator: String,
    #[serde(default)]
    pub(crate) igsn_config: Option<String>,
    #[serde(rename = "tmp_file", alias = "template", default)]
    pub(crate) template: Option<String>,
    #[serde(
        rename = "tmp_ID_placeholder",
        alias = "template_placeholder_ID",
        default = "default_placeholder"
    )]
    pub(crate) placeholder: String,
    #[serde(default = "default_output_dir")]
    pub(crate) output_dir: String,
    #[serde(rename = "output_dir_append_IGSN", default = "default_true")]
    pub(crate) output_dir_append_igsn: bool,
    #[serde(default = "default_output_base")]
    pub(crate) output_base: String,
    #[serde(rename = "output_append_ID", default = "default_true")]
    pub(crate) output_append_id: bool,
    #[serde(default)]
    pub(crate) output_append_template: bool,
    #[serde(default = "default_true")]
    pub(crate) output_append_timestamp: bool,
    #[serde(default)]
    pub(crate) output_overwrite: bool,
    #[serde(default)]
    pub(crate) flyer_selection: SelectionSpec,
    #[serde(default)]
    pub(crate) flyer_assignment: AssignmentSpec,
    #[serde(default = "default_flyer_prefix")]
    pub(crate) flyer_prefix: String,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_output_base() -> String {
    DEFAULT_OUTPUT_BASE.to_string()
}

fn default_flyer_prefix() -> String {
    DEFAULT_FLYER_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

/// A validated config with every path resolved against the config's folder.
#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub(crate) config: RunConfig,
    pub(crate) template_path: PathBuf,
    pub(crate) igsn_path: Option<PathBuf>,
    pub(crate) output_dir: PathBuf,
}

impl LoadedConfig {
    pub(crate) fn patch_plan(&self) -> PatchPlan {
        let placeholder = match self.config.placeholder.trim() {
            "" => DEFAULT_PLACEHOLDER,
            value => value,
        };
        PatchPlan {
            selection: self.config.flyer_selection.clone(),
            assignment: self.config.flyer_assignment.clone(),
            placeholder: PlaceholderRule::new(placeholder, self.config.id.trim()),
            flyer_prefix: self.config.flyer_prefix.clone(),
        }
    }

    pub(crate) fn naming_spec(&self) -> OutputNamingSpec {
        OutputNamingSpec {
            output_dir: self.output_dir.clone(),
            base_name: self.config.output_base.clone(),
            append_igsn: self.config.output_dir_append_igsn,
            append_id: self.config.output_append_id,
            append_template: self.config.output_append_template,
            append_timestamp: self.config.output_append_timestamp,
            overwrite: self.config.output_overwrite,
        }
    }

    pub(crate) fn naming_context(&self, igsn: Option<String>) -> NamingContext {
        NamingContext {
            run_id: self.config.id.trim().to_string(),
            template_path: Some(self.template_path.clone()),
            igsn,
        }
    }
}

pub(crate) fn load_run_config(path: &Path) -> Result<LoadedConfig, CutStackError> {
    let raw = fs::read_to_string(path).map_err(map_config_read)?;
    let config: RunConfig = serde_json::from_str(&raw).map_err(map_config_parse)?;
    validate_run_config(&config)?;

    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let template = config.template.as_deref().unwrap_or_default().trim();
    let output_dir = match config.output_dir.trim() {
        "" => DEFAULT_OUTPUT_DIR,
        value => value,
    };

    Ok(LoadedConfig {
        template_path: resolve_against(&base_dir, template),
        igsn_path: config
            .igsn_config
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| resolve_against(&base_dir, value)),
        output_dir: resolve_against(&base_dir, output_dir),
        config,
    })
}

fn resolve_against(base_dir: &Path, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn invalid(message: impl Into<String>) -> CutStackError {
    CutStackError::new("CONFIG_INVALID", message)
}

pub(crate) fn validate_run_config(config: &RunConfig) -> Result<(), CutStackError> {
    let id = config.id.trim();
    if id.is_empty() {
        return Err(invalid("ID is required."));
    }
    if id.len() != 4 || !id.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid(format!(
            "ID must be exactly 4 digits (e.g., 0001), got \"{}\".",
            id
        )));
    }
    if config.operator.trim().is_empty() {
        return Err(invalid("operator is required."));
    }
    if config
        .template
        .as_deref()
        .map_or(true, |template| template.trim().is_empty())
    {
        return Err(invalid("tmp_file is required."));
    }

    let selection = &config.flyer_selection;
    check_form_range("flyer_selection.start", Some(&selection.start))?;
    check_form_range("flyer_selection.end", selection.end.as_ref())?;
    check_form_range("flyer_selection.step", selection.step.as_ref())?;
    check_form_range("flyer_assignment.x", Some(&config.flyer_assignment.x))?;
    Ok(())
}

/// Integer settings must stay within the range the config form offers.
/// Text that is not an integer is left to the engine, which reports or
/// falls back on it.
fn check_form_range(label: &str, value: Option<&Scalar>) -> Result<(), CutStackError> {
    let (low, high) = (*FORM_INTEGER_RANGE.start(), *FORM_INTEGER_RANGE.end());
    let out_of_range = match value {
        Some(Scalar::Number(number)) => !(low as f64..=high as f64).contains(&number.trunc()),
        Some(other) => other
            .as_integer()
            .is_some_and(|number| !FORM_INTEGER_RANGE.contains(&number)),
        None => false,
    };
    if out_of_range {
        return Err(invalid(format!(
            "{} must be between {} and {} (got {}).",
            label,
            low,
            high,
            value.map(Scalar::to_string).unwrap_or_default()
        )));
    }
    Ok(())
}

/// Sample identifier from an IGSN config file: its `IGSN` (or `igsn`)
/// string, otherwise the file stem.
pub(crate) fn load_igsn(path: &Path) -> Result<Option<String>, CutStackError> {
    let raw = fs::read_to_string(path).map_err(map_igsn_read)?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(map_igsn_parse)?;
    let declared = ["IGSN", "igsn"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|entry| entry.as_str()))
        .map(str::trim)
        .filter(|igsn| !igsn.is_empty())
        .map(str::to_string);
    Ok(declared.or_else(|| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
    }))
}
