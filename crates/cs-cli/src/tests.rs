use super::*;
use crate::cli_test_support::*;

use cs_parser::parse_xml_document;
use std::fs;
use std::path::PathBuf;

const DEMO_FILES: [&str; 4] = [
    "0001config.json",
    "params.csv",
    "LB-templates/6x1stack.lbrn2",
    "igsn-config/IEDEMO0001.json",
];

fn demo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join("basic")
}

fn copy_demo(name: &str) -> PathBuf {
    let root = temp_path(name);
    for file in DEMO_FILES {
        let content = fs::read_to_string(demo_dir().join(file)).expect("demo file should exist");
        write_file(&root.join(file), &content);
    }
    root
}

fn run_args(root: &Path, extra: &[&str]) -> i32 {
    let mut args = vec![
        "cs-cli".to_string(),
        "run".to_string(),
        root.join("params.csv").to_string_lossy().to_string(),
        root.join("0001config.json").to_string_lossy().to_string(),
    ];
    args.extend(extra.iter().map(|arg| arg.to_string()));
    run_cli_from_args(args)
}

fn expected_output(root: &Path) -> PathBuf {
    root.join("output")
        .join("IEDEMO0001")
        .join("STACK-0001-6x1stack.lbrn2")
}

fn cut_value(document: &cs_parser::XmlDocument, token: &str, field: &str) -> Option<String> {
    cs_engine::find_cut_setting(document, token)
        .and_then(|cut| cut.child(field))
        .and_then(|node| node.attr("Value"))
        .map(str::to_string)
}

#[test]
fn run_writes_patched_project_into_igsn_directory() {
    let root = copy_demo("cli-run");
    assert_eq!(run_args(&root, &[]), 0);

    let output = expected_output(&root);
    let written = fs::read_to_string(&output).expect("output should be written");
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    let document = parse_xml_document(&written).expect("output should parse");

    let powers: Vec<Option<String>> = ["F1", "F2", "F3", "F4", "F5"]
        .iter()
        .map(|token| cut_value(&document, token, "maxPower"))
        .collect();
    assert_eq!(
        powers,
        vec![
            Some("35".to_string()),
            Some("35".to_string()),
            Some("50.5".to_string()),
            Some("50.5".to_string()),
            Some("65".to_string()),
        ]
    );
    assert_eq!(cut_value(&document, "F3", "frequency"), Some("45000".to_string()));
    assert_eq!(cut_value(&document, "F4", "numPasses"), Some("2".to_string()));
    assert_eq!(cut_value(&document, "Outline", "maxPower"), Some("80".to_string()));
    assert!(written.contains("Str=\"0001\""));
    assert!(!written.contains("FLYID"));

    let template = fs::read_to_string(root.join("LB-templates/6x1stack.lbrn2")).expect("template");
    assert!(template.contains("Str=\"FLYID\""));
}

#[test]
fn second_run_does_not_overwrite_first_output() {
    let root = copy_demo("cli-collision");
    assert_eq!(run_args(&root, &[]), 0);
    assert_eq!(run_args(&root, &[]), 0);

    let directory = root.join("output").join("IEDEMO0001");
    assert!(directory.join("STACK-0001-6x1stack.lbrn2").is_file());
    assert!(directory.join("STACK-0001-6x1stack-1.lbrn2").is_file());
}

#[test]
fn dry_run_leaves_output_directory_without_project() {
    let root = copy_demo("cli-dry-run");
    assert_eq!(run_args(&root, &["--dry-run"]), 0);
    assert!(!expected_output(&root).exists());
}

#[test]
fn run_reports_config_and_selection_errors() {
    let root = copy_demo("cli-errors");
    let config_path = root.join("0001config.json");

    let raw = fs::read_to_string(&config_path).expect("config");
    write_file(&config_path, &raw.replace("\"0001\"", "\"1\""));
    assert_eq!(run_args(&root, &[]), 1);

    write_file(
        &config_path,
        &raw.replace("\"start\": 1", "\"start\": 20").replace("\"end\": 6", "\"end\": 25"),
    );
    assert_eq!(run_args(&root, &[]), 1);
    assert!(!root.join("output").join("IEDEMO0001").exists());

    write_file(&config_path, &raw.replace("\"start\": 1", "\"start\": \"one\""));
    assert_eq!(run_args(&root, &[]), 1);
}

#[test]
fn run_reports_missing_dataset() {
    let root = copy_demo("cli-missing-dataset");
    fs::remove_file(root.join("params.csv")).expect("remove dataset");
    assert_eq!(run_args(&root, &[]), 1);
}

#[test]
fn inspect_counts_sequential_flyers() {
    let root = copy_demo("cli-inspect");
    let template = root.join("LB-templates/6x1stack.lbrn2");
    let code = run_cli_from_args([
        "cs-cli".to_string(),
        "inspect".to_string(),
        template.to_string_lossy().to_string(),
    ]);
    assert_eq!(code, 0);

    let document = load_template(&template).expect("template");
    assert_eq!(count_sequential_flyers(&document, "F", 1), 5);
}

#[test]
fn unknown_subcommand_returns_clap_exit_code() {
    assert_eq!(run_cli_from_args(["cs-cli", "explode"]), 2);
}
