// This test suite runs the udb2td binary itself. It checks the invocation contract: too
// few positional arguments print the usage text followed by the supported record kinds
// and exit with a failure status, a missing input path is reported as not found with
// status 1, and a successful run prints the generated path.

//! Command-line tests for udb2td.

use std::fs;
use std::process::{Command, Output};

fn udb2td(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_udb2td"))
        .args(args)
        .env_remove("UDB2TD_EXTENSION")
        .env_remove("UDB2TD_OUTPUT_NAME")
        .env_remove("UDB2TD_STRICT_FORMATS")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_missing_arguments_print_usage_and_kinds() {
    let output = udb2td(&[]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
    assert!(stdout.contains("Supports all UDB YAML types"));
    assert!(stdout.contains("  - Instructions (kind: instruction)"));
    assert!(stdout.contains("  - CSRs (kind: csr)"));
    assert!(stdout.contains("  - Extensions (kind: extension)"));
}

#[test]
fn test_single_argument_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = udb2td(&[dir.path().as_os_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Supports all UDB YAML types"));
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let out = dir.path().join("out.td");
    let output = udb2td(&[missing.as_os_str(), out.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("Error: {} not found", missing.display())));
    assert!(!out.exists());
}

#[test]
fn test_successful_run_prints_generated_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mstatus.yaml");
    let out = dir.path().join("mstatus.td");
    fs::write(&input, "kind: csr\nname: mstatus\naddress: \"0x300\"\n").unwrap();

    let output = udb2td(&[input.as_os_str(), out.as_os_str()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Generated {}", out.display())));
    assert!(fs::read_to_string(&out).unwrap().contains("def MSTATUS : RISCVReg<0x300, \"mstatus\">"));
}
