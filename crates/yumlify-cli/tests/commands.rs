//! End-to-end runs of the yumlify binary
//!
//! Only offline commands are exercised here; `resolve` needs the service.

use std::path::Path;
use std::process::{Command, Output};

const MODEL: &str = r#"{
    "types": [
        { "name": "String" },
        { "name": "Owner", "properties": [{ "name": "Name", "type": "String" }] },
        { "name": "Car", "properties": [{ "name": "Owner", "type": "Owner" }] }
    ],
    "diagram": ["Car", "Owner"]
}"#;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yumlify"))
        .args(args)
        .env("YUMLIFY_LOG_LEVEL", "off")
        .output()
        .expect("failed to spawn yumlify")
}

fn write_model(dir: &Path) -> String {
    let path = dir.join("model.json");
    std::fs::write(&path, MODEL).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_fragment_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());

    let output = run(&["fragment", "-i", &model]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "[Car]->[Owner],[Owner]"
    );
}

#[test]
fn test_fragment_with_detail_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let out = dir.path().join("diagram.yuml");

    let output = run(&[
        "fragment",
        "-i",
        &model,
        "-o",
        out.to_str().unwrap(),
        "--detail",
        "public-properties",
    ]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(out).unwrap().trim(),
        "[Car|+ Owner : Owner]->[Owner|+ Name : String],[Owner|+ Name : String]"
    );
}

#[test]
fn test_inspect_json() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());

    let output = run(&["inspect", "-i", &model, "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 3);
    assert_eq!(value["types"][0]["name"], "String");
    assert_eq!(value["types"][0]["in_diagram"], false);
}

#[test]
fn test_bad_model_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "types": [{ "name": "A", "base": "Missing" }] }"#).unwrap();

    let output = run(&["fragment", "-i", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing"));
}
