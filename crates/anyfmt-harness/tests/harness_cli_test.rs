//! Integration test: the `harness` binary end to end.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyfmt_harness::structured_log::validate_log_file;

fn workspace_root() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn harness() -> Command {
    Command::new(env!("CARGO_BIN_EXE_harness"))
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("anyfmt-cli-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn render_prints_formatted_output() {
    let output = harness()
        .args(["render", "%s=%05d|%x", "str:n", "i32:-42", "u32:255"])
        .output()
        .expect("harness should run");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "n=00-42|ff\n");
}

#[test]
fn render_strict_rejects_missing_argument() {
    let output = harness()
        .args(["render", "--strict", "%d%d", "i32:5"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ArgumentUnderflow"), "stderr={stderr}");
}

#[test]
fn render_rejects_bad_literal() {
    let output = harness().args(["render", "%d", "i32"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn verify_writes_report_log_and_artifact_index() {
    let root = workspace_root();
    let out = scratch_dir("verify");
    let report = out.join("conformance.md");
    let log = out.join("trace.jsonl");

    let output = harness()
        .current_dir(&root)
        .arg("verify")
        .arg("--fixture")
        .arg(root.join("tests/conformance/fixtures"))
        .arg("--report")
        .arg(&report)
        .arg("--log")
        .arg(&log)
        .args(["--timestamp", "2026-01-01T00:00:00.000Z"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let md = std::fs::read_to_string(&report).unwrap();
    assert!(md.contains("- Mode: legacy+strict"));
    assert!(md.contains("- Failed: 0"));
    assert!(md.contains("2026-01-01T00:00:00.000Z"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("conformance.json")).unwrap())
            .unwrap();
    assert_eq!(json["summary"]["failed"], 0);

    let index: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("conformance.artifacts.json")).unwrap(),
    )
    .unwrap();
    let artifacts = index["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 2);
    for artifact in artifacts {
        assert_eq!(artifact["sha256"].as_str().unwrap().len(), 64);
    }

    let (lines, errors) = validate_log_file(&log).unwrap();
    assert!(errors.is_empty(), "{errors:?}");
    // verify_start + one line per case + verify_complete
    assert!(lines > 2);

    let validate = harness()
        .arg("validate-log")
        .arg("--log")
        .arg(&log)
        .output()
        .unwrap();
    assert!(validate.status.success());

    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn verify_single_mode() {
    let root = workspace_root();
    let output = harness()
        .arg("verify")
        .arg("--fixture")
        .arg(root.join("tests/conformance/fixtures"))
        .args(["--mode", "strict"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed=0"), "stderr={stderr}");
}

#[test]
fn verify_fails_on_missing_fixture_dir() {
    let output = harness()
        .args(["verify", "--fixture", "/nonexistent/anyfmt/fixtures"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
