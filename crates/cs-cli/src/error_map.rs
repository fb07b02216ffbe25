use cs_core::CutStackError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> CutStackError {
    CutStackError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CutStackError) -> i32 {
    tracing::error!(code = %error.code, "{}", error.message);
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"\"".to_string())
    );
    1
}

pub(crate) fn map_config_read(error: std::io::Error) -> CutStackError {
    map_error("CONFIG_READ", error)
}

pub(crate) fn map_config_parse(error: serde_json::Error) -> CutStackError {
    map_error("CONFIG_PARSE", error)
}

pub(crate) fn map_igsn_read(error: std::io::Error) -> CutStackError {
    map_error("IGSN_CONFIG_READ", error)
}

pub(crate) fn map_igsn_parse(error: serde_json::Error) -> CutStackError {
    map_error("IGSN_CONFIG_PARSE", error)
}

pub(crate) fn map_dataset_read(error: impl Display) -> CutStackError {
    map_error("DATASET_READ", error)
}

pub(crate) fn map_template_read(error: std::io::Error) -> CutStackError {
    map_error("TEMPLATE_READ", error)
}

pub(crate) fn map_output_write(error: std::io::Error) -> CutStackError {
    map_error("OUTPUT_WRITE", error)
}
