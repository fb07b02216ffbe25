use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn demo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join("basic")
}

fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("target dir should be created");
    for entry in fs::read_dir(from).expect("demo dir must exist") {
        let entry = entry.expect("entry");
        let path = entry.path();
        let target = to.join(entry.file_name());
        if path.is_dir() {
            if entry.file_name() == "output" {
                continue;
            }
            copy_tree(&path, &target);
        } else {
            fs::copy(&path, &target).expect("file should copy");
        }
    }
}

#[test]
fn run_patches_demo_stack() {
    let bin = env!("CARGO_BIN_EXE_cs-cli");
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should move forward")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("cutstack-smoke-{}", nanos));
    copy_tree(&demo_dir(), &root);

    let output = Command::new(bin)
        .arg("run")
        .arg(root.join("params.csv"))
        .arg(root.join("0001config.json"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("cli should execute");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("RESULT:OK"));
    assert!(stdout.contains("SELECTED:5"));
    assert!(stdout.contains("APPLIED:5"));
    assert!(stdout.contains("REPLACED:1"));

    let written = root
        .join("output")
        .join("IEDEMO0001")
        .join("STACK-0001-6x1stack.lbrn2");
    assert!(stdout.contains(&format!("OUTPUT:{}", written.display())));
    assert!(written.is_file());
}

#[test]
fn run_with_bad_config_prints_error_protocol() {
    let bin = env!("CARGO_BIN_EXE_cs-cli");
    let output = Command::new(bin)
        .arg("run")
        .arg(demo_dir().join("params.csv"))
        .arg(demo_dir().join("missing-config.json"))
        .output()
        .expect("cli should execute");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:CONFIG_READ"));
}
