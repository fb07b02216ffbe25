use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use cs_core::{
    CutStackError, NamingContext, OutputNamingSpec, DEFAULT_OUTPUT_BASE, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_EXTENSION,
};
use regex::Regex;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

fn unsafe_token_char_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").expect("token regex"))
}

/// Maps every character outside `[A-Za-z0-9_-]` to `_`. Blank input yields
/// `None`.
pub fn sanitize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(unsafe_token_char_regex().replace_all(trimmed, "_").into_owned())
}

/// The base name must be a plain file name; separators would escape the
/// output directory.
pub fn validate_naming(spec: &OutputNamingSpec) -> Result<(), CutStackError> {
    let base = spec.base_name.trim();
    let mut components = Path::new(base).components();
    let plain = match (components.next(), components.next()) {
        (None, _) => true,
        (Some(Component::Normal(_)), None) => true,
        _ => false,
    };
    if !plain || base.contains('/') || base.contains('\\') {
        return Err(CutStackError::new(
            "NAMING_INVALID",
            format!("output_base must be a file name, got \"{}\".", spec.base_name),
        ));
    }
    Ok(())
}

pub fn output_directory(spec: &OutputNamingSpec, context: &NamingContext) -> PathBuf {
    let root = if spec.output_dir.as_os_str().is_empty() {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    } else {
        spec.output_dir.clone()
    };

    let igsn = context
        .igsn
        .as_deref()
        .filter(|_| spec.append_igsn)
        .and_then(sanitize_token);
    match igsn {
        Some(token) => root.join(token),
        None => root,
    }
}

/// File stem and extension (without the dot) for the candidate output file.
pub fn output_file_parts(
    spec: &OutputNamingSpec,
    context: &NamingContext,
    timestamp: &str,
) -> (String, String) {
    let base = Path::new(spec.base_name.trim());
    let base_stem = base
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_OUTPUT_BASE);

    let template = context.template_path.as_deref();
    let mut parts = vec![base_stem.to_string()];
    if spec.append_id {
        parts.extend(sanitize_token(&context.run_id));
    }
    if spec.append_template {
        parts.extend(
            template
                .and_then(|path| path.file_stem())
                .and_then(|stem| stem.to_str())
                .and_then(sanitize_token),
        );
    }
    if spec.append_timestamp {
        parts.extend(sanitize_token(timestamp));
    }

    let extension = base
        .extension()
        .or_else(|| template.and_then(|path| path.extension()))
        .and_then(|extension| extension.to_str())
        .filter(|extension| !extension.is_empty())
        .unwrap_or(DEFAULT_OUTPUT_EXTENSION);

    (parts.join("-"), extension.to_string())
}

pub fn resolve_output_path(
    spec: &OutputNamingSpec,
    context: &NamingContext,
) -> Result<PathBuf, CutStackError> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    resolve_output_path_at(spec, context, &timestamp)
}

/// Creates the output directory and returns the first free candidate:
/// `stem.ext`, then `stem-1.ext`, `stem-2.ext`, ... unless overwrite is on.
pub fn resolve_output_path_at(
    spec: &OutputNamingSpec,
    context: &NamingContext,
    timestamp: &str,
) -> Result<PathBuf, CutStackError> {
    validate_naming(spec)?;

    let directory = output_directory(spec, context);
    fs::create_dir_all(&directory).map_err(|error| {
        CutStackError::new(
            "OUTPUT_DIR_CREATE",
            format!("{}: {}", directory.display(), error),
        )
    })?;

    let (stem, extension) = output_file_parts(spec, context, timestamp);
    let candidate = directory.join(format!("{}.{}", stem, extension));
    if spec.overwrite || !candidate.exists() {
        return Ok(candidate);
    }

    let mut counter = 1u64;
    loop {
        let probe = directory.join(format!("{}-{}.{}", stem, counter, extension));
        if !probe.exists() {
            return Ok(probe);
        }
        counter += 1;
    }
}
